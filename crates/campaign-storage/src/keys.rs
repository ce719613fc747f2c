//! Shared key generation for storage backends.

use uuid::Uuid;

const KEY_PREFIX: &str = "campaign-media";

/// Generate a storage key for the given business and filename.
pub fn generate_storage_key(business_id: Uuid, filename: &str) -> String {
    if business_id == campaign_core::constants::DEFAULT_BUSINESS_ID {
        format!("{}/{}", KEY_PREFIX, filename)
    } else {
        format!("{}/{}/{}", KEY_PREFIX, business_id, filename)
    }
}

/// Reject keys that could escape the storage root.
pub fn is_safe_key(storage_key: &str) -> bool {
    !storage_key.is_empty() && !storage_key.contains("..") && !storage_key.starts_with('/')
}
