//! Campaign media upload: validate → inspect → probe → store.

pub mod traits;
pub mod types;

#[cfg(feature = "dimensions")]
mod dimensions;
mod pipeline;

pub use pipeline::{upload_campaign_media, upload_campaign_media_file};
pub use traits::UploadConfig;
pub use types::UploadData;
