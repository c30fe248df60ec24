//! Tag browser across courses, reminders and notes

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notes::Note;
use crate::reminders::Reminder;
use crate::roadmap::Course;

/// An item carrying a given tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "camelCase")]
pub enum TaggedItem {
    #[serde(rename_all = "camelCase")]
    Course { id: Uuid, name: String, topic_count: usize },
    #[serde(rename_all = "camelCase")]
    Reminder { id: Uuid, title: String, date: DateTime<Utc> },
    #[serde(rename_all = "camelCase")]
    Note { id: Uuid, title: String, last_modified: DateTime<Utc> },
}

impl TaggedItem {
    pub fn title(&self) -> &str {
        match self {
            TaggedItem::Course { name, .. } => name,
            TaggedItem::Reminder { title, .. } | TaggedItem::Note { title, .. } => title,
        }
    }
}

/// Tag → items index, built on demand
#[derive(Debug, Default, Clone)]
pub struct TagIndex {
    items: BTreeMap<String, Vec<TaggedItem>>,
}

impl TagIndex {
    pub fn build(courses: &[Course], reminders: &[Reminder], notes: &[Note]) -> Self {
        let mut index = Self::default();

        for course in courses {
            let item = TaggedItem::Course {
                id: course.id,
                name: course.name.clone(),
                topic_count: course.topic_count(),
            };
            index.insert(&course.tags, item);
        }
        for reminder in reminders {
            let item = TaggedItem::Reminder {
                id: reminder.id,
                title: reminder.title.clone(),
                date: reminder.date,
            };
            index.insert(&reminder.tags, item);
        }
        for note in notes {
            let item = TaggedItem::Note {
                id: note.id,
                title: note.title.clone(),
                last_modified: note.last_modified,
            };
            index.insert(&note.tags, item);
        }

        index
    }

    fn insert(&mut self, tags: &[String], item: TaggedItem) {
        // An item listing a tag twice still appears once under it
        let unique: BTreeSet<&str> = tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
        for tag in unique {
            self.items.entry(tag.to_string()).or_default().push(item.clone());
        }
    }

    /// All tags, sorted
    pub fn tags(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn items(&self, tag: &str) -> &[TaggedItem] {
        self.items.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tags with their item counts
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.items.iter().map(|(tag, items)| (tag.clone(), items.len())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::{ReminderInput, ReminderKind};
    use crate::roadmap::seed::mlops_course;

    #[test]
    fn test_index_across_item_types() {
        let course = mlops_course();
        let reminder = Reminder::from_input(ReminderInput {
            title: "Exam".to_string(),
            date: Utc::now(),
            kind: ReminderKind::Reminder,
            tags: vec!["mlops".to_string(), "exam".to_string()],
        });
        let note = Note::new(
            "Pipelines".to_string(),
            String::new(),
            vec!["mlops".to_string(), "mlops".to_string()],
            Utc::now(),
        );

        let index = TagIndex::build(&[course], &[reminder], &[note]);
        assert_eq!(index.tags(), vec!["career-plan", "exam", "mlops"]);

        let mlops = index.items("mlops");
        assert_eq!(mlops.len(), 3);
        assert!(matches!(mlops[0], TaggedItem::Course { topic_count: 16, .. }));
        assert!(matches!(mlops[1], TaggedItem::Reminder { .. }));
        assert_eq!(mlops[2].title(), "Pipelines");

        assert!(index.items("missing").is_empty());
    }

    #[test]
    fn test_tagged_item_json_shape() {
        let item = TaggedItem::Course {
            id: Uuid::nil(),
            name: "Rust".to_string(),
            topic_count: 3,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["itemType"], "course");
        assert_eq!(value["topicCount"], 3);
    }
}
