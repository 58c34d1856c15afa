//! Hugging Face router adapter.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::openai_compat::post_chat;
use crate::traits::{ChatMessage, ProviderGateway};

const API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-Coder-V2-Instruct";

/// Environment variable holding the Hugging Face token.
pub const TOKEN_ENV: &str = "HF_TOKEN";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "HF_MODEL";

/// Gateway adapter for the Hugging Face inference router.
pub struct HuggingFaceGateway {
    client: reqwest::Client,
    token: String,
    model: String,
}

impl HuggingFaceGateway {
    /// Builds the adapter from `HF_TOKEN` and optional `HF_MODEL`.
    pub fn from_env() -> Result<Self> {
        let token =
            std::env::var(TOKEN_ENV).map_err(|_| ProviderError::MissingCredential("HF_TOKEN"))?;
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            client: reqwest::Client::new(),
            token,
            model,
        })
    }
}

#[async_trait]
impl ProviderGateway for HuggingFaceGateway {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn ask(&self, messages: &[ChatMessage]) -> Result<String> {
        post_chat(&self.client, API_URL, &self.token, &self.model, messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_token() {
        std::env::remove_var(TOKEN_ENV);
        assert!(matches!(
            HuggingFaceGateway::from_env(),
            Err(ProviderError::MissingCredential("HF_TOKEN"))
        ));
    }
}
