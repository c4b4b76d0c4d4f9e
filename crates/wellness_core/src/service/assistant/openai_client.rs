//! Chat Completions client over blocking `reqwest`.

use super::{AssistantClient, AssistantError};
use crate::config::AssistantConfig;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Assistant client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiAssistantClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiAssistantClient {
    /// Builds a client whose requests time out after `timeout_secs`.
    ///
    /// A missing API key is not an error here; `complete` reports it.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| AssistantError::Upstream(format!("http client setup failed: {err}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl AssistantClient for OpenAiAssistantClient {
    fn complete(&self, system_context: &str, user_message: &str) -> Result<String, AssistantError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AssistantError::NotConfigured("OPENAI_API_KEY is not set"))?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_context,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|err| {
                let reason = if err.is_timeout() {
                    "timed out"
                } else if err.is_connect() {
                    "connection failed"
                } else {
                    "request failed"
                };
                AssistantError::Upstream(format!("assistant {reason}: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|err| AssistantError::Upstream(format!("unreadable assistant response: {err}")))?;
        extract_reply(parsed)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_reply(response: ChatCompletionResponse) -> Result<String, AssistantError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AssistantError::Upstream("assistant returned no content".to_string()))
}

fn map_http_error(status: StatusCode, body: &str) -> AssistantError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());
    let detail: String = detail
        .replace(['\n', '\r'], " ")
        .chars()
        .take(MAX_ERROR_DETAIL_CHARS)
        .collect();
    AssistantError::Upstream(format!("assistant HTTP {}: {detail}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::{extract_reply, map_http_error, ChatCompletionResponse, OpenAiAssistantClient};
    use crate::config::AssistantConfig;
    use crate::service::assistant::{AssistantClient, AssistantError};
    use reqwest::StatusCode;

    #[test]
    fn error_body_message_is_extracted() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#,
        );
        assert_eq!(
            err,
            AssistantError::Upstream("assistant HTTP 401: Incorrect API key".to_string())
        );
    }

    #[test]
    fn first_choice_content_is_the_reply() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Drink water."}}]}"#,
        )
        .expect("valid response json");
        assert_eq!(extract_reply(parsed), Ok("Drink water.".to_string()));
    }

    #[test]
    fn empty_choices_are_an_upstream_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).expect("valid response json");
        assert!(matches!(
            extract_reply(parsed),
            Err(AssistantError::Upstream(_))
        ));
    }

    #[test]
    fn missing_api_key_is_reported_without_network() {
        let client =
            OpenAiAssistantClient::from_config(&AssistantConfig::default()).expect("client");
        assert_eq!(client.model(), "gpt-4o");
        assert!(matches!(
            client.complete("context", "hello"),
            Err(AssistantError::NotConfigured(_))
        ));
    }
}
