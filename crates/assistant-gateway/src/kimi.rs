//! Kimi (Moonshot) adapter.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::openai_compat::post_chat;
use crate::traits::{ChatMessage, ProviderGateway};

const API_URL: &str = "https://api.moonshot.cn/v1/chat/completions";
const DEFAULT_MODEL: &str = "moonshot-v1-8k";

/// Environment variable holding the Kimi API key.
pub const TOKEN_ENV: &str = "KIMI_API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "KIMI_MODEL";

/// Gateway adapter for the Moonshot chat API.
pub struct KimiGateway {
    client: reqwest::Client,
    token: String,
    model: String,
}

impl KimiGateway {
    /// Builds the adapter from `KIMI_API_KEY` and optional
    /// `KIMI_MODEL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| ProviderError::MissingCredential("KIMI_API_KEY"))?;
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            client: reqwest::Client::new(),
            token,
            model,
        })
    }
}

#[async_trait]
impl ProviderGateway for KimiGateway {
    fn name(&self) -> &'static str {
        "kimi"
    }

    async fn ask(&self, messages: &[ChatMessage]) -> Result<String> {
        post_chat(&self.client, API_URL, &self.token, &self.model, messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_key() {
        std::env::remove_var(TOKEN_ENV);
        assert!(matches!(
            KimiGateway::from_env(),
            Err(ProviderError::MissingCredential("KIMI_API_KEY"))
        ));
    }
}
