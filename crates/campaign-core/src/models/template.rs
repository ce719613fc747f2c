use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message template as supplied by the template service.
///
/// Only `message_content` and `media_required` drive placeholder and media
/// handling; the rest is carried through to the send payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignTemplate {
    pub id: Uuid,
    pub name: String,
    pub message_content: String,
    #[serde(default)]
    pub media_required: bool,
}
