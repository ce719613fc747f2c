//! Error types module
//!
//! All errors surfaced to callers are unified under [`AppError`]. Each variant
//! self-describes how it should be presented through [`ErrorMetadata`], so the
//! developer-facing detail (for example an image rejection reason code) never
//! leaks into the operator-facing message.

use std::io;

use crate::constants::INVALID_IMAGE_MESSAGE;
use crate::models::ImageRejection;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected input worth diagnosing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_IMAGE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    /// Operator-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Image rejected ({code}): {0}", code = .0.code())]
    ImageRejected(#[source] ImageRejection),

    #[error("Image could not be read: {0}")]
    ImageUnreadable(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Missing template values: {}", .0.join(", "))]
    MissingTemplateValues(Vec<String>),

    #[error("Template requires media but none was uploaded")]
    MissingMedia,

    #[error("Placeholder is read-only: {0}")]
    ReadOnlyPlaceholder(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<ImageRejection> for AppError {
    fn from(err: ImageRejection) -> Self {
        AppError::ImageRejected(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::ImageRejected(_) | AppError::ImageUnreadable(_) => (
            400,
            "INVALID_IMAGE",
            false,
            Some("Choose a different image"),
            false,
            LogLevel::Warn,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingTemplateValues(_) => (
            422,
            "MISSING_TEMPLATE_VALUES",
            false,
            Some("Fill in every listed template variable"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingMedia => (
            422,
            "MISSING_MEDIA",
            false,
            Some("Upload an image for this template"),
            false,
            LogLevel::Debug,
        ),
        AppError::ReadOnlyPlaceholder(_) => (
            400,
            "READ_ONLY_PLACEHOLDER",
            false,
            None,
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::ImageRejected(_) => "ImageRejected",
            AppError::ImageUnreadable(_) => "ImageUnreadable",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::MissingTemplateValues(_) => "MissingTemplateValues",
            AppError::MissingMedia => "MissingMedia",
            AppError::ReadOnlyPlaceholder(_) => "ReadOnlyPlaceholder",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::ImageRejected(_) | AppError::ImageUnreadable(_) => {
                INVALID_IMAGE_MESSAGE.to_string()
            }
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::MissingTemplateValues(keys) => {
                format!("Please fill in all template variables: {}", keys.join(", "))
            }
            AppError::MissingMedia => "This template requires an image".to_string(),
            AppError::ReadOnlyPlaceholder(ref key) => {
                format!("{} is filled in automatically for each recipient", key)
            }
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Storage(_) => "Failed to store media".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_rejection_hides_reason_from_client() {
        let err = AppError::from(ImageRejection::JpegComponents(4));
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_IMAGE");
        assert_eq!(err.client_message(), INVALID_IMAGE_MESSAGE);
        assert!(err.to_string().contains("jpeg-components"));
        assert!(err.detailed_message().contains("Caused by"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_image_rejection_display_names_reason_code() {
        let err = AppError::from(ImageRejection::JpegComponents(4));
        assert_eq!(
            err.to_string(),
            "Image rejected (jpeg-components): JPEG has 4 components, expected 3"
        );
    }

    #[test]
    fn test_unreadable_image_uses_same_message() {
        let err = AppError::ImageUnreadable("permission denied".to_string());
        assert_eq!(err.client_message(), INVALID_IMAGE_MESSAGE);
        assert_eq!(err.error_code(), "INVALID_IMAGE");
    }

    #[test]
    fn test_missing_values_lists_every_key() {
        let err = AppError::MissingTemplateValues(vec!["Var1".to_string(), "offer".to_string()]);
        assert_eq!(err.http_status_code(), 422);
        assert!(err.client_message().contains("Var1, offer"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_storage_error_is_sensitive() {
        let err = AppError::Storage("disk full".to_string());
        assert!(err.is_sensitive());
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to store media");
        assert_eq!(err.suggested_action(), Some("Retry after a short delay"));
    }
}
