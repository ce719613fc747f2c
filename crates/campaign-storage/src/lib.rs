//! Campaign Storage Library
//!
//! Storage abstraction for validated campaign media, with a local filesystem
//! backend and an in-memory backend.
//!
//! # Storage key format
//!
//! - **Default business**: `campaign-media/{filename}`
//! - **Other businesses**: `campaign-media/{business_id}/{filename}`
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use campaign_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
