//! Environment-driven configuration.
//!
//! All application state lives under the state directory:
//!
//! ```text
//! ~/.ai-assistant/
//! ├── projects/            # one directory per project
//! └── active_project.json  # persisted active-project pointer
//! ```
//!
//! The Core treats provider selection, credentials and timeouts as
//! externally supplied; this module only resolves them.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "ASSISTANT_STATE_DIR";

/// Environment variable selecting the provider adapter.
pub const PROVIDER_ENV: &str = "ASSISTANT_PROVIDER";

/// Environment variable bounding provider calls, in seconds.
pub const PROVIDER_TIMEOUT_ENV: &str = "ASSISTANT_PROVIDER_TIMEOUT_SECS";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".ai-assistant";

/// Provider used when none is configured.
const DEFAULT_PROVIDER: &str = "huggingface";

/// Default bound on one provider call.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// The state directory, resolved as:
/// 1. `ASSISTANT_STATE_DIR` if set
/// 2. `~/.ai-assistant` if home is available
/// 3. `.ai-assistant` in the current directory
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// The configured provider adapter name.
pub fn provider_name() -> String {
    std::env::var(PROVIDER_ENV).unwrap_or_else(|_| DEFAULT_PROVIDER.to_string())
}

/// The bounded wait applied to each provider call.
pub fn provider_timeout() -> Duration {
    let secs = std::env::var(PROVIDER_TIMEOUT_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
