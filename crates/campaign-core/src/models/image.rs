use serde::{Deserialize, Serialize};

/// Encoding of an image that passed gateway inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayImageFormat {
    Png,
    Jpeg,
}

impl GatewayImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            GatewayImageFormat::Png => "png",
            GatewayImageFormat::Jpeg => "jpg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            GatewayImageFormat::Png => "image/png",
            GatewayImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Why an image was refused by byte-level inspection.
///
/// These are developer-facing diagnostics. Operators only ever see
/// [`INVALID_IMAGE_MESSAGE`](crate::constants::INVALID_IMAGE_MESSAGE).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("unsupported content type: {0}")]
    UnsupportedMime(String),

    #[error("file too small: {0} bytes")]
    TooSmall(usize),

    #[error("PNG is missing its IHDR chunk")]
    PngMissingIhdr,

    #[error("PNG bit depth {bit_depth} / color type {color_type} is not supported")]
    PngUnsupported { bit_depth: u8, color_type: u8 },

    #[error("file is neither JPEG nor PNG")]
    NotJpegOrPng,

    #[error("JPEG segment at offset {offset} has invalid length {length}")]
    JpegBadSegmentLength { offset: usize, length: u16 },

    #[error("JPEG segment at offset {offset} runs past the end of the file")]
    JpegTruncated { offset: usize },

    #[error("JPEG frame header is too short")]
    JpegSofTooShort,

    #[error("JPEG precision {0} is not 8 bits")]
    JpegPrecision(u8),

    #[error("JPEG has {0} components, expected 3")]
    JpegComponents(u8),

    #[error("JPEG has no frame header before scan data")]
    JpegMissingSof,
}

impl ImageRejection {
    /// Stable reason code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ImageRejection::UnsupportedMime(_) => "unsupported-mime",
            ImageRejection::TooSmall(_) => "too-small",
            ImageRejection::PngMissingIhdr => "png-missing-ihdr",
            ImageRejection::PngUnsupported { .. } => "png-unsupported",
            ImageRejection::NotJpegOrPng => "not-jpeg-or-png",
            ImageRejection::JpegBadSegmentLength { .. } => "jpeg-bad-seglen",
            ImageRejection::JpegTruncated { .. } => "jpeg-truncated",
            ImageRejection::JpegSofTooShort => "jpeg-sof-too-short",
            ImageRejection::JpegPrecision(_) => "jpeg-precision",
            ImageRejection::JpegComponents(_) => "jpeg-components",
            ImageRejection::JpegMissingSof => "jpeg-missing-sof",
        }
    }
}
