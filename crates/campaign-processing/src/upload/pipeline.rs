//! Upload pipeline: validate → inspect → probe → store.
//!
//! Any rejection blocks the storage call entirely; there is no retry. The
//! reason code is logged for diagnostics while callers surface only the fixed
//! operator message through [`ErrorMetadata`](campaign_core::ErrorMetadata).

use std::path::Path;
use std::sync::Arc;

use campaign_core::AppError;
use campaign_storage::Storage;
use chrono::Utc;
use uuid::Uuid;

use super::traits::UploadConfig;
use super::types::UploadData;
use crate::inspect::{inspect_gateway_image, inspect_gateway_image_file};
use crate::validator::MediaValidator;

fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let path = Path::new(filename);
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "invalid_filename".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim().is_empty() || s.len() < 3 {
        "file".to_string()
    } else {
        s
    }
}

#[cfg(feature = "dimensions")]
async fn probe(data: &[u8]) -> (Option<u32>, Option<u32>) {
    let data = data.to_vec();
    // Header decode is CPU-bound; keep it off the async pool.
    match tokio::task::spawn_blocking(move || super::dimensions::probe_dimensions(&data)).await {
        Ok(Ok((width, height))) => (Some(width), Some(height)),
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Could not read image dimensions");
            (None, None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dimension probe task failed");
            (None, None)
        }
    }
}

#[cfg(not(feature = "dimensions"))]
async fn probe(_data: &[u8]) -> (Option<u32>, Option<u32>) {
    (None, None)
}

/// Validate, inspect and store an in-memory campaign image.
pub async fn upload_campaign_media(
    business_id: Uuid,
    data: Vec<u8>,
    original_filename: &str,
    content_type: &str,
    config: &dyn UploadConfig,
    storage: Arc<dyn Storage>,
) -> Result<UploadData, AppError> {
    let validator = MediaValidator::for_gateway_images(config.max_file_size());
    validator
        .validate_all(content_type, data.len())
        .map_err(|e| {
            tracing::warn!(
                filename = %original_filename,
                content_type = %content_type,
                error = %e,
                "Campaign media failed prefilter"
            );
            AppError::from(e)
        })?;

    let format = inspect_gateway_image(content_type, &data).map_err(|rejection| {
        tracing::warn!(
            filename = %original_filename,
            reason = rejection.code(),
            detail = %rejection,
            "Campaign media rejected"
        );
        AppError::from(rejection)
    })?;

    store(business_id, data, original_filename, format, storage).await
}

/// Read a file from disk, then run the same pipeline as [`upload_campaign_media`].
///
/// The size limit is checked against file metadata before reading. Read
/// failures surface as [`AppError::ImageUnreadable`].
pub async fn upload_campaign_media_file(
    business_id: Uuid,
    path: &Path,
    content_type: &str,
    config: &dyn UploadConfig,
    storage: Arc<dyn Storage>,
) -> Result<UploadData, AppError> {
    let original_filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to stat campaign media");
        AppError::ImageUnreadable(format!("{}: {}", path.display(), e))
    })?;

    // Size is checked before the file is read into memory.
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    MediaValidator::for_gateway_images(config.max_file_size())
        .validate_all(content_type, size)
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Campaign media failed prefilter");
            AppError::from(e)
        })?;

    let (format, data) = inspect_gateway_image_file(path, content_type)
        .await
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Campaign media rejected");
        })?;

    store(business_id, data, &original_filename, format, storage).await
}

async fn store(
    business_id: Uuid,
    data: Vec<u8>,
    original_filename: &str,
    format: campaign_core::models::GatewayImageFormat,
    storage: Arc<dyn Storage>,
) -> Result<UploadData, AppError> {
    let (width, height) = probe(&data).await;

    let file_id = Uuid::new_v4();
    let uuid_filename = format!("{}.{}", file_id, format.extension());
    let file_size = data.len() as u64;

    let (storage_key, storage_url) = storage
        .upload(business_id, &uuid_filename, format.content_type(), data)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, filename = %uuid_filename, "Storage upload failed");
            AppError::from(e)
        })?;

    tracing::info!(
        business_id = %business_id,
        storage_key = %storage_key,
        format = ?format,
        size_bytes = file_size,
        "Campaign media stored"
    );

    Ok(UploadData {
        business_id,
        file_id,
        uuid_filename,
        safe_original_filename: sanitize_filename(original_filename),
        storage_key,
        storage_url,
        format,
        content_type: format.content_type().to_string(),
        file_size,
        width,
        height,
        uploaded_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_paths_and_symbols() {
        assert_eq!(sanitize_filename("/tmp/my banner!.png"), "my_banner_.png");
        assert_eq!(sanitize_filename("a"), "file");
        assert_eq!(sanitize_filename("..png"), "invalid_filename");
    }
}
