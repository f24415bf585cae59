//! Generator contract and the task-description use-case.

use crate::logging::summarize;
use async_trait::async_trait;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown inline when drafting fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate description due to an API error.";

const LOGGED_ERROR_MAX_CHARS: usize = 240;

/// Text generation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Title was blank; the generator was not called.
    EmptyTitle,
    /// Backend has no API key configured.
    MissingApiKey,
    /// Transport failure before a response arrived.
    Network(String),
    /// Request exceeded the configured timeout.
    Timeout,
    /// Backend answered 429.
    RateLimited,
    /// Backend answered with a non-success status.
    RequestFailed { status: u16, body: String },
    /// Response body did not have the expected shape.
    MalformedResponse(String),
    /// Backend returned no text.
    EmptyResponse,
}

impl GenerationError {
    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::MissingApiKey => "missing_api_key",
            Self::Network(_) => "network",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::RequestFailed { .. } => "request_failed",
            Self::MalformedResponse(_) => "malformed_response",
            Self::EmptyResponse => "empty_response",
        }
    }
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "enter a title before generating a description"),
            Self::MissingApiKey => write!(f, "text generator API key is not configured"),
            Self::Network(message) => write!(f, "text generator unreachable: {message}"),
            Self::Timeout => write!(f, "text generator timed out"),
            Self::RateLimited => write!(f, "text generator rate limit reached"),
            Self::RequestFailed { status, body } => {
                write!(f, "text generator returned HTTP {status}: {body}")
            }
            Self::MalformedResponse(message) => {
                write!(f, "unexpected text generator response: {message}")
            }
            Self::EmptyResponse => write!(f, "text generator returned no text"),
        }
    }
}

impl Error for GenerationError {}

/// External prompt-to-text service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend/model identifier for logs.
    fn id(&self) -> &str;

    /// Runs one generation for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Prompt sent for a task title.
pub fn task_description_prompt(title: &str) -> String {
    format!(
        "Based on the task title \"{title}\", generate a detailed, professional description \
         for a CRM task. The description should be concise, actionable, and structured with \
         clear objectives. Do not use markdown."
    )
}

/// Drafts a description for `title`.
///
/// # Errors
/// - `EmptyTitle` for a blank title, without calling `generator`.
/// - Any generator error, unchanged, after logging it.
pub async fn describe_task<G>(generator: &G, title: &str) -> Result<String, GenerationError>
where
    G: TextGenerator + ?Sized,
{
    let title = title.trim();
    if title.is_empty() {
        warn!("event=describe_task module=assist status=rejected error_code=empty_title");
        return Err(GenerationError::EmptyTitle);
    }

    let prompt = task_description_prompt(title);
    match generator.generate(&prompt).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                error!(
                    "event=describe_task module=assist status=error generator={} error_code=empty_response",
                    generator.id()
                );
                return Err(GenerationError::EmptyResponse);
            }
            info!(
                "event=describe_task module=assist status=ok generator={} chars={}",
                generator.id(),
                text.chars().count()
            );
            Ok(text.to_string())
        }
        Err(err) => {
            error!(
                "event=describe_task module=assist status=error generator={} error_code={} error={}",
                generator.id(),
                err.code(),
                summarize(&err.to_string(), LOGGED_ERROR_MAX_CHARS)
            );
            Err(err)
        }
    }
}
