//! Generative AI boundary
//!
//! Everything the app asks of the model goes through [`StudyAssistant`].
//! Failures carry the operation so surfaces can show a friendly
//! "please try again" message while logs keep the underlying cause.

pub mod gemini;
pub mod models;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use models::*;

use crate::companion::{ChatMessage, StudyView};
use crate::roadmap::Resource;

#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("missing API key: set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("the model returned no text")]
    EmptyResponse,
    #[error("json error: {0}")]
    Serde(String),
    #[error("invalid response: {0}")]
    Invalid(String),
}

/// Which assistant call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOperation {
    StudyPlan,
    Summary,
    Quiz,
    Explanation,
    Critique,
    MindMap,
    Conversation,
    WeeklyReport,
    Import,
    PrerequisiteResources,
}

impl AiOperation {
    /// Message shown to the user when the operation fails
    pub fn failure_message(self) -> &'static str {
        match self {
            AiOperation::StudyPlan => "Failed to generate detailed study plan. The AI may be busy or the topic is too complex. Please try again.",
            AiOperation::Summary => "Failed to generate summary. The AI might be having trouble with the content.",
            AiOperation::Quiz => "Failed to generate quiz. The AI might be having trouble with the content.",
            AiOperation::Explanation => "Failed to get explanation. The AI might be having trouble with the content.",
            AiOperation::Critique => "Failed to get feedback from the AI tutor.",
            AiOperation::MindMap => "Failed to generate mind map. Please try again.",
            AiOperation::Conversation => "I'm having trouble connecting right now. Please try again in a moment.",
            AiOperation::WeeklyReport => "Failed to generate weekly report. Please try again.",
            AiOperation::Import => "Failed to process the imported text.",
            AiOperation::PrerequisiteResources => "Failed to find resources. The AI may be busy, or the topic is too niche. Please try again.",
        }
    }
}

/// A failed assistant call. Displays as the user-facing message.
#[derive(Debug, Clone, Error)]
#[error("{}", .operation.failure_message())]
pub struct AiFailure {
    pub operation: AiOperation,
    #[source]
    pub cause: AiError,
}

impl AiFailure {
    pub fn new(operation: AiOperation, cause: AiError) -> Self {
        log::error!("AI {:?} failed: {}", operation, cause);
        Self { operation, cause }
    }

    /// No API key configured, as opposed to a failing service
    pub fn is_unconfigured(&self) -> bool {
        matches!(self.cause, AiError::MissingApiKey)
    }
}

pub type AiResult<T> = std::result::Result<T, AiFailure>;

#[async_trait]
pub trait StudyAssistant: Send + Sync {
    async fn generate_study_plan(&self, subject: &str) -> AiResult<GeneratedStudyPlan>;

    /// One-paragraph summary of note content (HTML allowed)
    async fn summarize(&self, text: &str) -> AiResult<String>;

    async fn generate_quiz(&self, text: &str) -> AiResult<Quiz>;

    async fn explain_concept(&self, concept: &str) -> AiResult<String>;

    /// Feynman-technique feedback on the user's explanation, as Markdown
    async fn critique_explanation(&self, concept: &str, explanation: &str) -> AiResult<String>;

    async fn generate_mind_map(&self, title: &str, text: &str) -> AiResult<GeneratedMindMap>;

    /// `history` holds the earlier turns only, not `message`
    async fn continue_conversation(
        &self,
        history: &[ChatMessage],
        message: &str,
        context: StudyView,
    ) -> AiResult<String>;

    /// Markdown weekly review
    async fn weekly_report(&self, stats: &WeeklyStats) -> AiResult<String>;

    async fn process_imported_content(&self, text: &str) -> AiResult<ImportedContent>;

    async fn prerequisite_resources(&self, skill: &str) -> AiResult<Vec<Resource>>;
}
