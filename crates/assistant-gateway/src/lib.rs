//! Language-model provider gateway.
//!
//! The rest of the system depends only on the [`ProviderGateway`]
//! capability: an ordered sequence of role/content messages in, text
//! out. One adapter exists per provider (GigaChat, Hugging Face
//! router, Kimi); the adapter is selected once at startup by name and
//! never branched on again.

pub mod error;
pub mod gigachat;
pub mod huggingface;
pub mod kimi;
pub mod openai_compat;
pub mod registry;
pub mod traits;

pub use error::{ProviderError, Result};
pub use gigachat::GigaChatGateway;
pub use huggingface::HuggingFaceGateway;
pub use kimi::KimiGateway;
pub use registry::{create_gateway, PROVIDER_NAMES};
pub use traits::{ChatMessage, ProviderGateway};
