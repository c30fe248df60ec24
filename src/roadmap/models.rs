//! Roadmap data models: courses made of phases of checklist topics

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A learning resource attached to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "Paid Course")]
    PaidCourse,
    #[serde(rename = "Free Course")]
    FreeCourse,
    Article,
    Video,
    Documentation,
    Book,
    GitHub,
    #[serde(other)]
    Other,
}

impl ResourceKind {
    /// Values the AI is allowed to produce
    pub const KNOWN: [&'static str; 7] = [
        "Paid Course",
        "Free Course",
        "Article",
        "Video",
        "Documentation",
        "Book",
        "GitHub",
    ];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::PaidCourse => "Paid Course",
            ResourceKind::FreeCourse => "Free Course",
            ResourceKind::Article => "Article",
            ResourceKind::Video => "Video",
            ResourceKind::Documentation => "Documentation",
            ResourceKind::Book => "Book",
            ResourceKind::GitHub => "GitHub",
            ResourceKind::Other => "Other",
        };
        f.write_str(label)
    }
}

impl Course {
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.phases.iter().flat_map(|p| p.topics.iter())
    }

    pub fn topic_count(&self) -> usize {
        self.topics().count()
    }

    pub fn completed_count(&self) -> usize {
        self.topics().filter(|t| t.completed).count()
    }

    /// Completed share of all topics, 0-100. A course without topics is at 0.
    pub fn progress(&self) -> f64 {
        let total = self.topic_count();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64 * 100.0
    }
}

/// Course listing entry with progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub topic_count: usize,
    pub completed_count: usize,
    pub progress: f64,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            tags: course.tags.clone(),
            topic_count: course.topic_count(),
            completed_count: course.completed_count(),
            progress: course.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_kind_names() {
        let resource: Resource = serde_json::from_value(json!({
            "title": "Rust Book",
            "url": "https://doc.rust-lang.org/book/",
            "type": "Paid Course"
        }))
        .unwrap();
        assert_eq!(resource.kind, ResourceKind::PaidCourse);

        let unknown: Resource = serde_json::from_value(json!({
            "title": "Podcast",
            "url": "https://example.com",
            "type": "Podcast"
        }))
        .unwrap();
        assert_eq!(unknown.kind, ResourceKind::Other);
    }

    #[test]
    fn test_progress_of_empty_course_is_zero() {
        let course = Course {
            id: Uuid::new_v4(),
            name: "Empty".to_string(),
            description: String::new(),
            prerequisites: Vec::new(),
            phases: Vec::new(),
            tags: Vec::new(),
        };
        assert_eq!(course.progress(), 0.0);
    }
}
