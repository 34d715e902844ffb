//! Chat-completions client that turns the prompt into report markdown.

use std::time::Duration;

use presswatch_core::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    /// Creates a client pointed at the OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, ReportError> {
        Self::with_base_url(api_key, model, temperature, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            temperature,
        })
    }

    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        Self::with_base_url(
            &config.openai_api_key,
            &config.llm_model,
            config.llm_temperature,
            config.request_timeout_secs,
            &config.openai_base_url,
        )
    }

    /// Send `prompt` as a single user message and return the report markdown.
    ///
    /// A code fence wrapping the whole answer is removed.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Http`] on network failure.
    /// - [`ReportError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ReportError::Deserialize`] if the body is not a chat completion.
    /// - [`ReportError::EmptyCompletion`] if the first choice has no content.
    pub async fn complete(&self, prompt: &str) -> Result<String, ReportError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ReportError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ReportError::Deserialize {
                context: format!("chat completion (model={})", self.model),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ReportError::EmptyCompletion)?;

        tracing::info!(model = %self.model, report_chars = content.len(), "report drafted");
        Ok(strip_code_fence(&content).to_string())
    }
}

/// Remove a ```` ``` ```` or ```` ```markdown ```` fence around the whole text.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    match inner.split_once('\n') {
        Some((info, body)) if info.trim().is_empty() || is_markdown_tag(info) => body.trim_end(),
        _ => text,
    }
}

fn is_markdown_tag(info: &str) -> bool {
    matches!(info.trim().to_ascii_lowercase().as_str(), "markdown" | "md")
}

/// Report text used when the model cannot be reached.
///
/// Carries no metric lines, so every chart renders its empty state.
#[must_use]
pub fn fallback_report(company: &str, error: &ReportError) -> String {
    format!("# Reporte de Sentimiento - {company}\n\nError generando el reporte: {error}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_fence() {
        let text = "```markdown\n# Reporte\n* Positivo: 1\n```";
        assert_eq!(strip_code_fence(text), "# Reporte\n* Positivo: 1");
    }

    #[test]
    fn strips_bare_fence_with_surrounding_whitespace() {
        assert_eq!(strip_code_fence("  ```\n## A\n```\n"), "## A");
    }

    #[test]
    fn unfenced_text_is_untouched() {
        let text = "# Reporte\n```\ncode\n```";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn other_languages_are_untouched() {
        let text = "```json\n{}\n```";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn fallback_report_keeps_title_heading() {
        let report = fallback_report("Adecoagro", &ReportError::EmptyCompletion);
        assert!(report.starts_with("# Reporte de Sentimiento - Adecoagro\n"));
        assert!(report.contains("language model returned no content"));
    }
}
