//! Reqwest-backed Gemini orchestrator adapter.
//!
//! The adapter relays decisions made by the model. Each step posts the
//! conversation so far; while the reply asks for function calls, those calls
//! run through the [`ToolRegistry`] and their results are appended before the
//! model is called again. The first reply without function calls ends the
//! turn.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

use super::dto::{
    ContentDto, ErrorEnvelopeDto, FunctionDeclarationDto, FunctionResponseDto,
    GenerateContentRequestDto, GenerateContentResponseDto, GenerationConfigDto, MODEL_ROLE,
    ToolDto, USER_ROLE,
};
use crate::domain::ToolRegistry;
use crate::domain::ports::{Orchestrator, OrchestratorError};
use crate::domain::session::Turn;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Persona and working rules given to the model as its system instruction.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are DataGen, a helpful assistant that generates \
sample data for applications. To generate users, you need: first_names (list), last_names \
(list), domains (list), min_age, max_age, city (list). Fill in these values yourself without \
asking for them. When asked to save users, first generate them with the tool, then immediately \
use write_json with the result. If the user refers to 'those users' from a previous request, \
ask them to specify the details again.";

/// Connection and sampling settings for the Gemini adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    /// API root, for example `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: Url,
    /// Model identifier such as `gemini-2.5-flash`.
    pub model: String,
    /// Key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of model calls per user turn.
    pub max_steps: u32,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// System instruction sent with every request.
    pub system_prompt: String,
}

/// Failures while constructing the adapter.
#[derive(Debug, Error)]
pub enum GeminiClientError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The base URL and model do not form a valid endpoint.
    #[error("invalid Gemini endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// One `generateContent` round trip.
#[async_trait]
trait GenerateContent: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequestDto<'_>,
    ) -> Result<GenerateContentResponseDto, OrchestratorError>;
}

struct HttpGenerateContent {
    client: Client,
    endpoint: Url,
    api_key: String,
}

#[async_trait]
impl GenerateContent for HttpGenerateContent {
    async fn generate_content(
        &self,
        request: &GenerateContentRequestDto<'_>,
    ) -> Result<GenerateContentResponseDto, OrchestratorError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            OrchestratorError::decode(format!("invalid Gemini JSON payload: {error}"))
        })
    }
}

/// Orchestrator adapter that talks to one Gemini model.
pub struct GeminiOrchestrator {
    transport: Box<dyn GenerateContent>,
    registry: Arc<ToolRegistry>,
    system_instruction: ContentDto,
    tools: Vec<ToolDto>,
    generation_config: GenerationConfigDto,
    max_steps: u32,
}

impl GeminiOrchestrator {
    /// Build an adapter that posts to `{base_url}/models/{model}:generateContent`.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(
        settings: &GeminiSettings,
        registry: Arc<ToolRegistry>,
    ) -> Result<Self, GeminiClientError> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        let transport = HttpGenerateContent {
            client,
            endpoint: endpoint_url(&settings.base_url, &settings.model)?,
            api_key: settings.api_key.clone(),
        };
        Ok(Self::with_transport(Box::new(transport), registry, settings))
    }

    fn with_transport(
        transport: Box<dyn GenerateContent>,
        registry: Arc<ToolRegistry>,
        settings: &GeminiSettings,
    ) -> Self {
        let declarations = registry
            .definitions()
            .into_iter()
            .map(FunctionDeclarationDto::from)
            .collect();
        Self {
            transport,
            registry,
            system_instruction: ContentDto::system(&settings.system_prompt),
            tools: vec![ToolDto {
                function_declarations: declarations,
            }],
            generation_config: GenerationConfigDto {
                temperature: settings.temperature,
            },
            max_steps: settings.max_steps.max(1),
        }
    }

    fn run_tool_calls(&self, content: &ContentDto) -> Option<ContentDto> {
        let calls = content.function_calls();
        if calls.is_empty() {
            return None;
        }
        let responses = calls
            .into_iter()
            .map(|call| {
                let result = self.registry.invoke(&call.name, &call.args);
                FunctionResponseDto::wrapping(&call.name, result)
            })
            .collect();
        Some(ContentDto::function_responses(responses))
    }
}

#[async_trait]
impl Orchestrator for GeminiOrchestrator {
    async fn converse(&self, history: &[Turn], input: &str) -> Result<String, OrchestratorError> {
        let mut contents = history_contents(history);
        contents.push(ContentDto::text(USER_ROLE, input));

        for step in 1..=self.max_steps {
            let request = GenerateContentRequestDto {
                contents: &contents,
                system_instruction: &self.system_instruction,
                tools: &self.tools,
                generation_config: self.generation_config,
            };
            debug!(step, contents = contents.len(), "calling Gemini");
            let response = self.transport.generate_content(&request).await?;
            let content = reply_content(response)?;

            match self.run_tool_calls(&content) {
                Some(tool_results) => {
                    debug!(step, calls = tool_results.parts.len(), "executed tool calls");
                    contents.push(content);
                    contents.push(tool_results);
                }
                None => {
                    info!(steps = step, "Gemini produced a reply");
                    let text = content.answer_text();
                    return if text.trim().is_empty() {
                        Err(OrchestratorError::empty_reply())
                    } else {
                        Ok(text)
                    };
                }
            }
        }

        Err(OrchestratorError::step_limit_exceeded(self.max_steps))
    }
}

fn endpoint_url(base_url: &Url, model: &str) -> Result<Url, url::ParseError> {
    let base = base_url.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}/models/{model}:generateContent"))
}

fn history_contents(history: &[Turn]) -> Vec<ContentDto> {
    history
        .iter()
        .flat_map(|turn| {
            [
                ContentDto::text(USER_ROLE, &turn.human),
                ContentDto::text(MODEL_ROLE, &turn.agent),
            ]
        })
        .collect()
}

fn reply_content(response: GenerateContentResponseDto) -> Result<ContentDto, OrchestratorError> {
    let block_reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(block_reason.map_or_else(OrchestratorError::empty_reply, |reason| {
            OrchestratorError::rejected(format!("prompt blocked: {reason}"))
        }));
    };

    let mut content = candidate.content.ok_or_else(|| {
        debug!(finish_reason = ?candidate.finish_reason, "candidate carried no content");
        OrchestratorError::empty_reply()
    })?;
    content.role = Some(MODEL_ROLE.to_owned());
    Ok(content)
}

fn map_transport_error(error: reqwest::Error) -> OrchestratorError {
    if error.is_timeout() {
        OrchestratorError::timeout(error.to_string())
    } else {
        OrchestratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> OrchestratorError {
    let detail = error_detail(body);
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => OrchestratorError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            OrchestratorError::timeout(message)
        }
        _ if status.is_client_error() => OrchestratorError::rejected(message),
        _ => OrchestratorError::transport(message),
    }
}

/// Prefer the API's own error message; fall back to a compact body preview.
fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_orchestrator_tests.rs"]
mod tests;
