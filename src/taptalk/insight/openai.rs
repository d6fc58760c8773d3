use super::{CompletionService, ServiceError, EMPTY_INSIGHT};
use crate::config::TaptalkConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat-completions client. One user message in, the first choice's text out.
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, api_base: &str, model: &str) -> Result<Self, ServiceError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &TaptalkConfig) -> Result<Self, ServiceError> {
        Self::new(config.resolved_api_key(), &config.api_base, &config.model)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl CompletionService for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let api_key = self.api_key.as_deref().ok_or(ServiceError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }

        let completion: ChatCompletionResponse = response.json()?;
        parse_choice(completion)
    }
}

fn parse_choice(completion: ChatCompletionResponse) -> Result<String, ServiceError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|c| {
            c.message
                .content
                .unwrap_or_else(|| EMPTY_INSIGHT.to_string())
        })
        .ok_or(ServiceError::EmptyResponse)
}
