//! Application-wide constants.

use uuid::Uuid;

/// Business ID used by single-business installs and the CLI when none is given.
/// Format: 5c1e7a20-4b9d-4f63-a8d2-9e0f1b2c3d4e
pub const DEFAULT_BUSINESS_ID: Uuid = Uuid::from_u128(0x5c1e7a20_4b9d_4f63_a8d2_9e0f1b2c3d4e);

/// Content types the messaging gateway accepts for template media.
pub const GATEWAY_IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// The only message shown to operators when an image is rejected, whatever the reason.
pub const INVALID_IMAGE_MESSAGE: &str = "Image is invalid. Please check the image properties; supported are JPG/JPEG, RGB/RGBA, 8 bit/channels and PNG, RGB/RGBA, up to 8 bit/channel.";

/// Literal value of the reserved recipient-name placeholder. The send pipeline
/// resolves it per recipient.
pub const CUSTOMER_NAME_TOKEN: &str = "{customer_name}";

/// Placeholder name for the wallet-campaign amount.
pub const WALLET_AMOUNT_KEY: &str = "wallet_amount";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
