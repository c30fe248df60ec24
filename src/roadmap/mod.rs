//! Roadmap tracker: courses, phases and checklist topics

pub mod models;
pub mod seed;

use uuid::Uuid;

pub use models::*;

use crate::ai::GeneratedStudyPlan;
use crate::notes::normalize_tags;
use crate::storage::{Result, StorageError};

/// Build a course from an AI study plan. All topics start uncompleted.
pub fn course_from_plan(plan: GeneratedStudyPlan, tags: Vec<String>) -> Course {
    let phases = plan
        .phases
        .into_iter()
        .map(|phase| Phase {
            id: Uuid::new_v4(),
            title: phase.title,
            topics: phase
                .topics
                .into_iter()
                .map(|topic| Topic {
                    id: Uuid::new_v4(),
                    text: topic.text,
                    completed: false,
                    resources: topic.resources,
                })
                .collect(),
        })
        .collect();

    Course {
        id: Uuid::new_v4(),
        name: plan.course_name,
        description: plan.description,
        prerequisites: plan.prerequisites,
        phases,
        tags: normalize_tags(tags),
    }
}

/// Flip a topic's completion, returning the new state
pub fn toggle_topic(courses: &mut [Course], course_id: Uuid, topic_id: Uuid) -> Result<bool> {
    let course = courses
        .iter_mut()
        .find(|c| c.id == course_id)
        .ok_or_else(|| StorageError::NotFound(format!("Course {} not found", course_id)))?;

    let topic = course
        .phases
        .iter_mut()
        .flat_map(|p| p.topics.iter_mut())
        .find(|t| t.id == topic_id)
        .ok_or_else(|| StorageError::NotFound(format!("Topic {} not found", topic_id)))?;

    topic.completed = !topic.completed;
    Ok(topic.completed)
}

pub fn delete_course(courses: &mut Vec<Course>, course_id: Uuid) -> Result<()> {
    let before = courses.len();
    courses.retain(|c| c.id != course_id);
    if courses.len() == before {
        return Err(StorageError::NotFound(format!("Course {} not found", course_id)));
    }
    Ok(())
}

pub fn find_course(courses: &[Course], course_id: Uuid) -> Result<&Course> {
    courses
        .iter()
        .find(|c| c.id == course_id)
        .ok_or_else(|| StorageError::NotFound(format!("Course {} not found", course_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{GeneratedPhase, GeneratedTopic};

    fn plan() -> GeneratedStudyPlan {
        GeneratedStudyPlan {
            course_name: "Rust Systems".to_string(),
            description: "Ownership to async".to_string(),
            prerequisites: vec!["C basics".to_string()],
            phases: vec![
                GeneratedPhase {
                    title: "Week 1-2: Ownership".to_string(),
                    topics: vec![
                        GeneratedTopic {
                            text: "Borrowing".to_string(),
                            resources: vec![Resource {
                                title: "The Book".to_string(),
                                url: "https://doc.rust-lang.org/book/".to_string(),
                                kind: ResourceKind::Book,
                            }],
                        },
                        GeneratedTopic {
                            text: "Lifetimes".to_string(),
                            resources: Vec::new(),
                        },
                    ],
                },
                GeneratedPhase {
                    title: "Week 3: Async".to_string(),
                    topics: vec![GeneratedTopic {
                        text: "Futures".to_string(),
                        resources: Vec::new(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_course_from_plan() {
        let course = course_from_plan(plan(), vec!["rust".to_string(), "rust".to_string()]);
        assert_eq!(course.name, "Rust Systems");
        assert_eq!(course.phases.len(), 2);
        assert_eq!(course.topic_count(), 3);
        assert_eq!(course.completed_count(), 0);
        assert_eq!(course.tags, vec!["rust"]);
        assert_eq!(course.phases[0].topics[0].resources[0].kind, ResourceKind::Book);
    }

    #[test]
    fn test_toggle_topic_updates_progress() {
        let mut courses = vec![course_from_plan(plan(), Vec::new())];
        let course_id = courses[0].id;
        let topic_id = courses[0].phases[1].topics[0].id;

        assert!(toggle_topic(&mut courses, course_id, topic_id).unwrap());
        let progress = courses[0].progress();
        assert!((progress - 100.0 / 3.0).abs() < 1e-9);

        assert!(!toggle_topic(&mut courses, course_id, topic_id).unwrap());
        assert_eq!(courses[0].progress(), 0.0);
    }

    #[test]
    fn test_toggle_unknown_topic() {
        let mut courses = vec![course_from_plan(plan(), Vec::new())];
        let course_id = courses[0].id;
        let result = toggle_topic(&mut courses, course_id, Uuid::new_v4());
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete_course() {
        let mut courses = vec![course_from_plan(plan(), Vec::new())];
        let id = courses[0].id;
        delete_course(&mut courses, id).unwrap();
        assert!(courses.is_empty());
        assert!(delete_course(&mut courses, id).is_err());
    }
}
