use crate::domain::error::DomainError;
use crate::domain::ports::price_extractor::{ExtractedPrice, PriceExtractor};
use crate::domain::values::channel::Channel;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Price extraction over an OpenAI-compatible chat-completions endpoint.
/// The model reads filtered listing text and replies with a single JSON
/// object; everything else about the prompt is an implementation detail of
/// this adapter.
pub struct OpenAiExtractor {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ExtractionReply {
    price: f64,
    #[serde(default)]
    listing_count: usize,
}

impl OpenAiExtractor {
    pub fn new(base_url: String, api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        }
    }

    fn prompt(product_name: &str, channel: Channel, corpus: &[String]) -> String {
        let task = match channel {
            Channel::Used => {
                "Find valid USED listings and compute their average price. \
                 Ignore parts-only, broken, and box-only listings."
            }
            _ => {
                "Find the LOWEST price for a NEW unit. Ignore used, \
                 refurbished, renewed and open-box listings, other models, \
                 and accessories."
            }
        };
        format!(
            "Product: \"{product_name}\"\n{task}\n\
             If a price is under $50 it is likely a cable or box; ignore it.\n\
             Listings:\n{}\n\
             Return JSON ONLY: {{\"price\": float (0.0 if none found), \"listing_count\": int}}",
            corpus.join("\n---\n")
        )
    }

    /// Models often wrap JSON in a ```json fence despite instructions.
    fn strip_fence(content: &str) -> &str {
        if let Some(start) = content.find("```json") {
            let rest = &content[start + 7..];
            if let Some(end) = rest.find("```") {
                return rest[..end].trim();
            }
        }
        content.trim()
    }
}

#[async_trait::async_trait]
impl PriceExtractor for OpenAiExtractor {
    async fn extract(
        &self,
        product_name: &str,
        channel: Channel,
        corpus: &[String],
    ) -> Result<Option<ExtractedPrice>, DomainError> {
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage {
                    role: "user".to_string(),
                    content: Self::prompt(product_name, channel, corpus),
                }],
                temperature: 0.6,
            })
            .send()
            .await
            .map_err(|e| DomainError::Extraction(format!("Extraction API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Extraction(format!(
                "Extraction API {status}: {body}"
            )));
        }

        let result: ChatResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Extraction(format!("Parse error: {e}")))?;
        let Some(choice) = result.choices.first() else {
            return Ok(None);
        };

        let reply: ExtractionReply =
            serde_json::from_str(Self::strip_fence(&choice.message.content))
                .map_err(|e| DomainError::Parse(format!("Bad extraction reply: {e}")))?;

        if reply.price <= 0.0 || !reply.price.is_finite() {
            return Ok(None);
        }
        Ok(Some(ExtractedPrice {
            price: reply.price,
            listing_count: reply.listing_count.max(1),
        }))
    }
}
