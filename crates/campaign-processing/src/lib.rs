//! Campaign Media Processing Library
//!
//! Byte-level image inspection against the messaging gateway's encoding rules,
//! the template placeholder engine, send preparation and the campaign-media
//! upload pipeline.

pub mod inspect;
pub mod placeholder;
pub mod send;
pub mod upload;
pub mod validator;

// Re-export commonly used types
pub use inspect::{inspect_gateway_image, inspect_gateway_image_file};
pub use placeholder::{extract_placeholders, render_preview, TemplateValue, TemplateValues};
pub use send::prepare_send;
pub use upload::{upload_campaign_media, upload_campaign_media_file, UploadConfig, UploadData};
pub use validator::MediaValidator;
