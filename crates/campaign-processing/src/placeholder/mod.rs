//! Template placeholder engine
//!
//! - `extract`: derive the ordered, deduplicated set of fillable keys from a body
//! - `values`: seed, carry over and auto-fill values; report missing keys
//! - `preview`: substitute values into the body for a live preview

mod extract;
mod preview;
mod values;

pub use extract::extract_placeholders;
pub use preview::render_preview;
pub use values::{TemplateValue, TemplateValues};
