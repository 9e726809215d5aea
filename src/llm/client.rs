use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Article writer settings
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    /// Kept low: the article must stay close to the evidence
    pub temperature: f64,
    /// Room for a summary paragraph and a full article body
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Key from `ANTHROPIC_API_KEY`; `AGENDA_MODEL` overrides the model
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY must be set to send the article prompt")?;
        let model = std::env::var("AGENDA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.2,
            max_tokens: 4096,
        }
    }

    fn request(&self, system: Option<&str>, user: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            system: system.map(str::to_string),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        }
    }
}

/// Sends article prompts to the Anthropic messages endpoint
pub struct AnthropicClient {
    http: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Text of the first text block of the reply
    pub async fn send_message(&self, system: Option<&str>, user: &str) -> Result<String> {
        let request = self.config.request(system, user);

        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .context("Article request did not reach the API")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Article request rejected ({}): {}", status, detail);
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .context("Article reply is not a messages response")?;

        first_text(&reply).context("Article reply contains no text")
    }
}

fn first_text(response: &MessagesResponse) -> Option<String> {
    response
        .content
        .iter()
        .find(|c| c.content_type == "text")
        .map(|c| c.text.clone())
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}
