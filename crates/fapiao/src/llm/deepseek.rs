//! Chat-completions client for the DeepSeek API (OpenAI-compatible).

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::llm::ChatCompletion;

pub struct DeepSeekClient {
    http: reqwest::blocking::Client,
    config: LlmConfig,
}

impl DeepSeekClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

impl ChatCompletion for DeepSeekClient {
    fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        // A missing credential is fatal only here, at the point of the first
        // external call; cached files never reach this path.
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(LlmError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = completions_url(&self.config.base_url);
        debug!("Submitting chat completion to {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyChoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_without_double_slash() {
        assert_eq!(
            completions_url("https://api.deepseek.com"),
            "https://api.deepseek.com/chat/completions"
        );
        assert_eq!(
            completions_url("https://api.deepseek.com/"),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn test_missing_api_key_fails_at_call_time() {
        let client = DeepSeekClient::new(LlmConfig::default()).unwrap();
        let err = client.complete_json("system", "user").unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![ChatMessage {
                role: "system",
                content: "instruction",
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_body_parsing() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("{}"));
    }
}
