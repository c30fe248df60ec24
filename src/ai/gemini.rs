//! Gemini REST client implementing [`StudyAssistant`]
//!
//! Speaks `POST {base}/v1beta/models/{model}:generateContent`. Structured
//! calls send a response schema and parse the returned text as JSON. There
//! is no retry: a failure is reported once and the user decides.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{GeneratedMindMap, GeneratedStudyPlan, ImportedContent, Quiz, WeeklyStats};
use super::{prompts, AiError, AiFailure, AiOperation, AiResult, StudyAssistant};
use crate::companion::{ChatMessage, StudyView};
use crate::config::AiConfig;
use crate::roadmap::Resource;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&'static str>, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    pro_model: String,
    flash_model: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("studyhub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        if config.api_key.is_none() {
            log::warn!("No Gemini API key configured; AI features will be unavailable");
        }

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            pro_model: config.pro_model.clone(),
            flash_model: config.flash_model.clone(),
        })
    }

    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        log::debug!("Gemini request to {}", model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Serde(e.to_string()))?;
        parsed.text().ok_or(AiError::EmptyResponse)
    }

    async fn text(&self, model: &str, prompt: String) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: None,
            generation_config: None,
        };
        self.generate(model, &request).await
    }

    async fn structured<T: DeserializeOwned>(&self, model: &str, prompt: String, schema: Value) -> Result<T, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };
        let text = self.generate(model, &request).await?;
        parse_json(&text)
    }
}

/// Parse model output as JSON, tolerating a surrounding Markdown code fence
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim()).map_err(|e| AiError::Serde(e.to_string()))
}

fn fail(operation: AiOperation) -> impl FnOnce(AiError) -> AiFailure {
    move |cause| AiFailure::new(operation, cause)
}

#[async_trait]
impl StudyAssistant for GeminiClient {
    async fn generate_study_plan(&self, subject: &str) -> AiResult<GeneratedStudyPlan> {
        self.structured(&self.pro_model, prompts::study_plan(subject), prompts::study_plan_schema())
            .await
            .map_err(fail(AiOperation::StudyPlan))
    }

    async fn summarize(&self, text: &str) -> AiResult<String> {
        self.text(&self.flash_model, prompts::summary(text))
            .await
            .map_err(fail(AiOperation::Summary))
    }

    async fn generate_quiz(&self, text: &str) -> AiResult<Quiz> {
        let quiz: Quiz = self
            .structured(&self.flash_model, prompts::quiz(text), prompts::quiz_schema())
            .await
            .map_err(fail(AiOperation::Quiz))?;
        quiz.validate().map_err(fail(AiOperation::Quiz))?;
        Ok(quiz)
    }

    async fn explain_concept(&self, concept: &str) -> AiResult<String> {
        self.text(&self.flash_model, prompts::explain(concept))
            .await
            .map_err(fail(AiOperation::Explanation))
    }

    async fn critique_explanation(&self, concept: &str, explanation: &str) -> AiResult<String> {
        self.text(&self.pro_model, prompts::critique(concept, explanation))
            .await
            .map_err(fail(AiOperation::Critique))
    }

    async fn generate_mind_map(&self, title: &str, text: &str) -> AiResult<GeneratedMindMap> {
        self.structured(&self.flash_model, prompts::mind_map(title, text), prompts::mind_map_schema())
            .await
            .map_err(fail(AiOperation::MindMap))
    }

    async fn continue_conversation(
        &self,
        history: &[ChatMessage],
        message: &str,
        context: StudyView,
    ) -> AiResult<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content::text(Some(m.role.as_str()), m.text.clone()))
            .collect();
        contents.push(Content::text(Some("user"), message));

        let request = GenerateRequest {
            contents,
            system_instruction: Some(Content::text(None, prompts::companion_instruction(context))),
            generation_config: None,
        };
        self.generate(&self.pro_model, &request)
            .await
            .map_err(fail(AiOperation::Conversation))
    }

    async fn weekly_report(&self, stats: &WeeklyStats) -> AiResult<String> {
        self.text(&self.flash_model, prompts::weekly_report(stats))
            .await
            .map_err(fail(AiOperation::WeeklyReport))
    }

    async fn process_imported_content(&self, text: &str) -> AiResult<ImportedContent> {
        self.structured(&self.flash_model, prompts::import(text), prompts::import_schema())
            .await
            .map_err(fail(AiOperation::Import))
    }

    async fn prerequisite_resources(&self, skill: &str) -> AiResult<Vec<Resource>> {
        self.structured(
            &self.flash_model,
            prompts::prerequisite_resources(skill),
            prompts::resources_schema(),
        )
        .await
        .map_err(fail(AiOperation::PrerequisiteResources))
    }
}
