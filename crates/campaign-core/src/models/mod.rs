//! Data models for the application
//!
//! Each sub-module represents a specific feature area.

mod campaign;
mod image;
mod placeholder;
mod template;

// Re-export all models for convenient imports
pub use campaign::*;
pub use image::*;
pub use placeholder::*;
pub use template::*;
