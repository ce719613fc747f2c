use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_CURRENCY_SYMBOL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignKind {
    #[default]
    Standard,
    /// Wallet top-up campaigns render `{wallet_amount}` as a currency value.
    Wallet,
}

/// Known details of the sending business, used to seed blank placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessIdentity {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Campaign-scoped state that affects preview rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignContext {
    pub kind: CampaignKind,
    /// Raw operator input for the wallet amount, if entered outside the value map.
    pub wallet_amount: Option<String>,
    pub currency_symbol: String,
}

impl Default for CampaignContext {
    fn default() -> Self {
        Self {
            kind: CampaignKind::Standard,
            wallet_amount: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl CampaignContext {
    pub fn wallet(amount: Option<String>) -> Self {
        Self {
            kind: CampaignKind::Wallet,
            wallet_amount: amount,
            ..Self::default()
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Wallet amount entered on the campaign itself, if this is a wallet campaign.
    pub fn entered_wallet_amount(&self) -> Option<&str> {
        if self.kind != CampaignKind::Wallet {
            return None;
        }
        self.wallet_amount
            .as_deref()
            .filter(|amount| !amount.trim().is_empty())
    }
}

/// One filled placeholder in a send payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendValue {
    pub key: String,
    pub value: String,
}

/// Payload handed to the send pipeline once every required field is filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCampaignPayload {
    pub template_id: Uuid,
    /// Values in the order their placeholders first appear in the body.
    pub values: Vec<SendValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub prepared_at: DateTime<Utc>,
}

impl SendCampaignPayload {
    /// Case-insensitive lookup of a payload value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.key.eq_ignore_ascii_case(key))
            .map(|v| v.value.as_str())
    }
}
