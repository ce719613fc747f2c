//! Types for the upload pipeline.

use campaign_core::models::GatewayImageFormat;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A stored campaign image. `storage_url` is the durable URL handed to the
/// send pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct UploadData {
    pub business_id: Uuid,
    pub file_id: Uuid,
    pub uuid_filename: String,
    pub safe_original_filename: String,
    pub storage_key: String,
    pub storage_url: String,
    pub format: GatewayImageFormat,
    pub content_type: String,
    pub file_size: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub uploaded_at: DateTime<Utc>,
}
