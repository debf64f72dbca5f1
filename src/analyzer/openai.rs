use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AESTHETIC_PROMPT, AestheticAnalyzer, parse_aesthetic};
use crate::{config, error::AnalyzerError, info, types::AestheticResult};

/// MIME type assumed when the upload cannot be identified as an image.
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Analyzer backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiAnalyzer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAnalyzer {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env(client: Client) -> Result<Self, AnalyzerError> {
        Ok(Self::new(
            client,
            config::openai_api_url(),
            config::openai_api_key()?,
            config::openai_model(),
        ))
    }

    fn image_data_url(image: &[u8]) -> String {
        let mime = infer::get(image)
            .map(|kind| kind.mime_type())
            .filter(|mime| mime.starts_with("image/"))
            .unwrap_or(FALLBACK_IMAGE_MIME);
        format!("data:{};base64,{}", mime, STANDARD.encode(image))
    }
}

#[async_trait]
impl AestheticAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<AestheticResult, AnalyzerError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: AESTHETIC_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: Self::image_data_url(image),
                        },
                    },
                ],
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzerError::Timeout
                } else {
                    AnalyzerError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Malformed(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalyzerError::Malformed("response has no content".to_string()))?;

        info!("Raw analyzer response: {}", content);
        let aesthetic = parse_aesthetic(&content)?;
        info!(
            "Aesthetic: \"{}\" (artists: {}, terms: {})",
            aesthetic.description,
            aesthetic.seed_artists.join(", "),
            aesthetic.search_terms.join(", ")
        );
        Ok(aesthetic)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
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
