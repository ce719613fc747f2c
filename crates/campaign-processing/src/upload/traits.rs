//! Traits for the upload pipeline.

use campaign_core::Config;

/// Configuration the upload pipeline needs.
pub trait UploadConfig: Send + Sync {
    fn max_file_size(&self) -> usize;
}

impl UploadConfig for Config {
    fn max_file_size(&self) -> usize {
        self.max_image_size_bytes
    }
}
