//! Provider selection by configured name.

use std::sync::Arc;

use tracing::info;

use crate::error::{ProviderError, Result};
use crate::gigachat::GigaChatGateway;
use crate::huggingface::HuggingFaceGateway;
use crate::kimi::KimiGateway;
use crate::traits::ProviderGateway;

/// Names accepted by [`create_gateway`].
pub const PROVIDER_NAMES: &[&str] = &["gigachat", "huggingface", "kimi"];

/// Instantiates the adapter for `name`, reading its credentials from
/// the environment. Called once at startup; the result is shared as
/// `Arc<dyn ProviderGateway>`.
pub fn create_gateway(name: &str) -> Result<Arc<dyn ProviderGateway>> {
    let gateway: Arc<dyn ProviderGateway> = match name {
        "gigachat" => Arc::new(GigaChatGateway::from_env()?),
        "huggingface" => Arc::new(HuggingFaceGateway::from_env()?),
        "kimi" => Arc::new(KimiGateway::from_env()?),
        other => return Err(ProviderError::UnknownProvider(other.to_string())),
    };
    info!(provider = gateway.name(), "Provider gateway selected");
    Ok(gateway)
}
