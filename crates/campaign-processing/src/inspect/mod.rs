//! Gateway image inspection
//!
//! Decides from raw bytes whether an image satisfies the messaging gateway's
//! encoding constraints: 8-bit RGB/RGBA PNG, or 8-bit 3-component JPEG. The
//! declared content type is only a prefilter; magic bytes decide the format.

mod jpeg;
mod png;

use std::path::Path;

use campaign_core::constants::GATEWAY_IMAGE_CONTENT_TYPES;
use campaign_core::models::{GatewayImageFormat, ImageRejection};
use campaign_core::AppError;

const MIN_IMAGE_LEN: usize = 16;

/// Normalize a declared content type: lower-case, parameters dropped.
pub(crate) fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

pub fn is_gateway_content_type(content_type: &str) -> bool {
    let normalized = normalize_content_type(content_type);
    GATEWAY_IMAGE_CONTENT_TYPES.contains(&normalized.as_str())
}

/// Inspect an in-memory image. Pure; returns on the first structural problem.
pub fn inspect_gateway_image(
    content_type: &str,
    bytes: &[u8],
) -> Result<GatewayImageFormat, ImageRejection> {
    if !is_gateway_content_type(content_type) {
        return Err(ImageRejection::UnsupportedMime(content_type.to_string()));
    }

    if bytes.len() < MIN_IMAGE_LEN {
        return Err(ImageRejection::TooSmall(bytes.len()));
    }

    if png::is_png(bytes) {
        png::check_png(bytes)?;
        return Ok(GatewayImageFormat::Png);
    }

    if !jpeg::is_jpeg(bytes) {
        return Err(ImageRejection::NotJpegOrPng);
    }

    jpeg::check_jpeg(bytes)?;
    Ok(GatewayImageFormat::Jpeg)
}

/// Read a file and inspect it. Read failures surface as [`AppError::ImageUnreadable`].
///
/// Returns the detected format together with the bytes so callers can upload
/// without reading the file twice.
pub async fn inspect_gateway_image_file(
    path: &Path,
    content_type: &str,
) -> Result<(GatewayImageFormat, Vec<u8>), AppError> {
    if !is_gateway_content_type(content_type) {
        return Err(ImageRejection::UnsupportedMime(content_type.to_string()).into());
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read image file");
        AppError::ImageUnreadable(format!("{}: {}", path.display(), e))
    })?;

    let format = inspect_gateway_image(content_type, &bytes).inspect_err(|rejection| {
        tracing::debug!(
            path = %path.display(),
            reason = rejection.code(),
            detail = %rejection,
            "Image failed gateway inspection"
        );
    })?;

    Ok((format, bytes))
}

/// Guess a gateway content type from a file extension, for callers without a declared one.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::jpeg::fixtures::{jpeg, sof, APP0, DHT_SEGMENT, SOS_EOI};
    use super::png::png_header;
    use super::*;

    #[test]
    fn test_unsupported_mime_checked_first() {
        assert_eq!(
            inspect_gateway_image("image/gif", &png_header(8, 2)),
            Err(ImageRejection::UnsupportedMime("image/gif".to_string()))
        );
    }

    #[test]
    fn test_content_type_is_normalized() {
        assert!(is_gateway_content_type("IMAGE/PNG"));
        assert!(is_gateway_content_type("image/jpg"));
        assert!(is_gateway_content_type(" image/jpeg; charset=binary"));
        assert!(!is_gateway_content_type("image/webp"));
    }

    #[test]
    fn test_ten_byte_file_is_too_small() {
        for content_type in ["image/png", "image/jpeg", "image/jpg"] {
            assert_eq!(
                inspect_gateway_image(content_type, &[0xFF; 10]),
                Err(ImageRejection::TooSmall(10))
            );
        }
    }

    #[test]
    fn test_declared_png_without_signature_is_not_jpeg_or_png() {
        let bytes = vec![0x42; 64];
        assert_eq!(
            inspect_gateway_image("image/png", &bytes),
            Err(ImageRejection::NotJpegOrPng)
        );
    }

    #[test]
    fn test_format_comes_from_bytes_not_declared_type() {
        let jpeg_bytes = jpeg(&[APP0, DHT_SEGMENT, &sof(0xC0, 8, 3), SOS_EOI]);
        assert_eq!(
            inspect_gateway_image("image/png", &jpeg_bytes),
            Ok(GatewayImageFormat::Jpeg)
        );
        assert_eq!(
            inspect_gateway_image("image/jpeg", &png_header(8, 6)),
            Ok(GatewayImageFormat::Png)
        );
    }

    #[test]
    fn test_png_rejections_propagate() {
        assert_eq!(
            inspect_gateway_image("image/png", &png_header(8, 3)),
            Err(ImageRejection::PngUnsupported {
                bit_depth: 8,
                color_type: 3
            })
        );
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for_path(Path::new("a.JPEG")), Some("image/jpeg"));
        assert_eq!(content_type_for_path(Path::new("a.png")), Some("image/png"));
        assert_eq!(content_type_for_path(Path::new("a.gif")), None);
        assert_eq!(content_type_for_path(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn test_file_inspection_reads_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("banner.png");
        tokio::fs::write(&path, png_header(8, 2)).await.unwrap();

        let (format, bytes) = inspect_gateway_image_file(&path, "image/png").await.unwrap();
        assert_eq!(format, GatewayImageFormat::Png);
        assert_eq!(bytes.len(), 33);
    }

    #[tokio::test]
    async fn test_missing_file_is_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = inspect_gateway_image_file(&dir.path().join("none.png"), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageUnreadable(_)));
    }
}
