use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::LlmConfig;
use crate::error::ProviderError;

const VISION_MAX_TOKENS: u32 = 300;
const CHAT_MAX_TOKENS: u32 = 200;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One-shot multimodal call: prompt plus an inline image, raw text back.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: Bytes,
        mime_type: &str,
    ) -> Result<String, ProviderError>;

    /// Plain chat call under a fixed system prompt.
    async fn generate_with_text(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    vision_model: String,
    chat_model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        #[serde(rename = "type")]
        kind: String,
        text: String,
    },
    ImageUrl {
        #[serde(rename = "type")]
        kind: String,
        image_url: ImageUrl,
    },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            vision_model: config.vision_model.clone(),
            chat_model: config.chat_model.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "chat completion request failed");
                ProviderError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat completion returned error status");
            return Err(ProviderError::Request(format!("{status}: {body}")));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to decode chat completion response");
            ProviderError::Malformed(e.to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("no choices in response".into()))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: Bytes,
        mime_type: &str,
    ) -> Result<String, ProviderError> {
        let encoded = general_purpose::STANDARD.encode(&image);
        let data_url = format!("data:{mime_type};base64,{encoded}");

        let request = ChatCompletionRequest {
            model: self.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        kind: "text".into(),
                        text: prompt.into(),
                    },
                    ContentPart::ImageUrl {
                        kind: "image_url".into(),
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            }],
            max_tokens: VISION_MAX_TOKENS,
        };

        self.complete(request).await
    }

    async fn generate_with_text(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: MessageContent::Text(system_prompt.into()),
                },
                ChatMessage {
                    role: "user".into(),
                    content: MessageContent::Text(user_message.into()),
                },
            ],
            max_tokens: CHAT_MAX_TOKENS,
        };

        self.complete(request).await
    }
}
