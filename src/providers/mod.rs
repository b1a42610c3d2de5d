mod anthropic;
mod factory;
mod fallback;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_recipe_prompt, RECIPE_GENERATOR_PROMPT};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

/// Boxed error returned by providers. `Send + Sync` so it can cross the
/// request handler's await points.
pub type ProviderError = Box<dyn Error + Send + Sync>;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send one prompt and return the text of the completion
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// HTTP client shared by the provider implementations.
fn http_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Decode a provider response as JSON.
///
/// The body is read as text first so that a gateway error page still reports
/// the HTTP status instead of a decode failure.
async fn read_json_body(provider: &str, response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| body_excerpt(&body));
        return Err(format!("{provider} API returned {status}: {message}").into());
    }

    parsed.ok_or_else(|| {
        format!(
            "{provider} API returned {status} with a non-JSON body: {}",
            body_excerpt(&body)
        )
        .into()
    })
}

/// `{"error": {"message": ..}}` or `{"error": ".."}`.
fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    error["message"]
        .as_str()
        .or_else(|| error.as_str())
        .map(str::to_string)
}

fn body_excerpt(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return "empty body".to_string();
    }
    body.chars().take(MAX_CHARS).collect()
}
