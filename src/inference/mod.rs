pub mod api_types;
pub mod huggingface;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use self::api_types::GenerationResponse;
use crate::prompt;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no provider API token configured")]
    NotConfigured,
    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("provider request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider response is not JSON: {0}")]
    Decode(String),
    #[error("provider response has no generated text")]
    UnexpectedResponse,
}

/// A hosted text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Collapse a provider response into a single completion string.
///
/// Models that echo their input return `prompt + completion`; when the text
/// starts with the prompt that prefix is dropped. Every shape goes through the
/// same echo handling and is trimmed afterwards.
pub fn normalize_completion(response: Value, prompt: &str) -> Result<String, ProviderError> {
    let text = serde_json::from_value::<GenerationResponse>(response)
        .ok()
        .and_then(GenerationResponse::into_text)
        .ok_or(ProviderError::UnexpectedResponse)?;

    let completion = text.strip_prefix(prompt).unwrap_or(&text);

    Ok(completion.trim().to_string())
}

/// Run the prompt through the provider, substituting the placeholder on any failure.
pub async fn generate_or_placeholder(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("Provider call failed, using placeholder: {}", err);
            prompt::placeholder(prompt)
        }
    }
}
