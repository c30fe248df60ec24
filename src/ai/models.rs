//! Typed results of the structured AI operations

use serde::{Deserialize, Serialize};

use super::AiError;
use crate::mindmap::{MindMapEdge, MindMapNode};
use crate::roadmap::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStudyPlan {
    pub course_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub phases: Vec<GeneratedPhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPhase {
    pub title: String,
    #[serde(default)]
    pub topics: Vec<GeneratedTopic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTopic {
    pub text: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer: usize,
}

impl Quiz {
    /// Reject quizzes the UI could not grade
    pub fn validate(&self) -> Result<(), AiError> {
        if self.questions.is_empty() {
            return Err(AiError::Invalid("quiz has no questions".to_string()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.answer >= q.options.len() {
                return Err(AiError::Invalid(format!(
                    "question {} has answer {} but {} options",
                    i + 1,
                    q.answer,
                    q.options.len()
                )));
            }
        }
        Ok(())
    }

    /// Count correct answers. Missing answers count as wrong.
    pub fn grade(&self, answers: &[Option<usize>]) -> u32 {
        self.questions
            .iter()
            .zip(answers.iter().chain(std::iter::repeat(&None)))
            .filter(|(q, a)| **a == Some(q.answer))
            .count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMindMap {
    pub nodes: Vec<MindMapNode>,
    #[serde(default)]
    pub edges: Vec<MindMapEdge>,
}

/// Title, summary and tags extracted from pasted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedContent {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Inputs of the weekly report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub hours: f64,
    pub tasks: usize,
    pub achievements: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> Quiz {
        Quiz {
            questions: vec![
                QuizQuestion {
                    question: "2 + 2?".to_string(),
                    options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
                    answer: 1,
                },
                QuizQuestion {
                    question: "Capital of France?".to_string(),
                    options: vec!["Paris".into(), "Rome".into(), "Oslo".into(), "Bern".into()],
                    answer: 0,
                },
            ],
        }
    }

    #[test]
    fn test_grade() {
        let quiz = quiz();
        assert_eq!(quiz.grade(&[Some(1), Some(0)]), 2);
        assert_eq!(quiz.grade(&[Some(1), Some(3)]), 1);
        assert_eq!(quiz.grade(&[Some(1)]), 1);
        assert_eq!(quiz.grade(&[]), 0);
    }

    #[test]
    fn test_validate_answer_index() {
        assert!(quiz().validate().is_ok());

        let mut bad = quiz();
        bad.questions[1].answer = 4;
        assert!(matches!(bad.validate(), Err(AiError::Invalid(_))));

        assert!(Quiz { questions: Vec::new() }.validate().is_err());
    }
}
