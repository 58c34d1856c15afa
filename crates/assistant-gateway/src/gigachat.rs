//! GigaChat adapter.
//!
//! Token acquisition (the OAuth exchange) is treated as external
//! configuration: the adapter consumes a ready access token from the
//! environment.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::openai_compat::post_chat;
use crate::traits::{ChatMessage, ProviderGateway};

const API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "GigaChat-Pro";

/// Environment variable holding a ready GigaChat access token.
pub const TOKEN_ENV: &str = "GIGACHAT_ACCESS_TOKEN";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "GIGACHAT_MODEL";

/// Gateway adapter for the GigaChat API.
pub struct GigaChatGateway {
    client: reqwest::Client,
    token: String,
    model: String,
}

impl GigaChatGateway {
    /// Builds the adapter from `GIGACHAT_ACCESS_TOKEN` and optional
    /// `GIGACHAT_MODEL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| ProviderError::MissingCredential("GIGACHAT_ACCESS_TOKEN"))?;
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            client: reqwest::Client::new(),
            token,
            model,
        })
    }
}

#[async_trait]
impl ProviderGateway for GigaChatGateway {
    fn name(&self) -> &'static str {
        "gigachat"
    }

    async fn ask(&self, messages: &[ChatMessage]) -> Result<String> {
        post_chat(&self.client, API_URL, &self.token, &self.model, messages).await
    }
}
