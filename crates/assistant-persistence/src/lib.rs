//! Filesystem-backed project store.
//!
//! Projects live as one directory per project under a projects root;
//! the directory listing is the registry. The active-project pointer is
//! persisted beside the root and written atomically (temp file, then
//! rename) so a crash can never leave it half-written.
//!
//! # Example
//!
//! ```no_run
//! use assistant_persistence::ProjectStore;
//!
//! let mut store = ProjectStore::open("/home/user/.ai-assistant").unwrap();
//! store.create("demo").unwrap();
//! store.switch("demo").unwrap();
//! assert_eq!(store.get_active(), Some("demo"));
//! ```

pub mod error;
pub mod fsio;
pub mod store;

pub use error::{Result, StoreError};
pub use store::ProjectStore;
