//! Send preparation: the last gate before a campaign is handed to the send pipeline.

use campaign_core::models::{CampaignContext, CampaignTemplate, SendCampaignPayload, SendValue};
use campaign_core::AppError;
use chrono::Utc;

use crate::placeholder::{extract_placeholders, TemplateValues};

/// Build the send payload, or report everything that blocks sending.
///
/// Required keys are re-derived from the template body so stale value maps
/// cannot skip a field. An amount entered on a wallet campaign fills
/// `wallet_amount` the same way the preview does. The reserved recipient-name
/// value passes through unresolved.
pub fn prepare_send(
    template: &CampaignTemplate,
    values: &TemplateValues,
    context: &CampaignContext,
    media_url: Option<&str>,
) -> Result<SendCampaignPayload, AppError> {
    let keys = extract_placeholders(&template.message_content);
    let mut values = values.clone();
    values.apply_context(context);

    let missing = values.missing_for(&keys);
    if !missing.is_empty() {
        tracing::debug!(
            template_id = %template.id,
            missing = ?missing,
            "Send blocked by missing template values"
        );
        return Err(AppError::MissingTemplateValues(missing));
    }

    let media_url = media_url.map(str::trim).filter(|url| !url.is_empty());
    if template.media_required && media_url.is_none() {
        return Err(AppError::MissingMedia);
    }

    let values = keys
        .iter()
        .filter_map(|key| {
            values.get(&key.name).map(|value| SendValue {
                key: key.name.clone(),
                value: value.to_string(),
            })
        })
        .collect();

    tracing::info!(
        template_id = %template.id,
        has_media = media_url.is_some(),
        "Campaign ready to send"
    );

    Ok(SendCampaignPayload {
        template_id: template.id,
        values,
        media_url: media_url.map(str::to_string),
        prepared_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::constants::CUSTOMER_NAME_TOKEN;
    use campaign_core::models::BusinessIdentity;
    use uuid::Uuid;

    fn template(body: &str, media_required: bool) -> CampaignTemplate {
        CampaignTemplate {
            id: Uuid::new_v4(),
            name: "offer".to_string(),
            message_content: body.to_string(),
            media_required,
        }
    }

    fn resolved(template: &CampaignTemplate) -> TemplateValues {
        TemplateValues::resolve(
            &extract_placeholders(&template.message_content),
            None,
            &BusinessIdentity::default(),
        )
    }

    #[test]
    fn test_blocks_on_every_missing_value() {
        let template = template("Hi {customer_name}, {Var1} at {Var2}", false);
        let values = resolved(&template);
        match prepare_send(&template, &values, &CampaignContext::default(), None) {
            Err(AppError::MissingTemplateValues(missing)) => {
                assert_eq!(missing, vec!["Var1", "Var2"])
            }
            other => panic!("expected missing values, got {:?}", other),
        }
    }

    #[test]
    fn test_requires_media_when_template_does() {
        let template = template("Offer {Var1}", true);
        let mut values = resolved(&template);
        values.set("Var1", "20%").unwrap();

        assert!(matches!(
            prepare_send(&template, &values, &CampaignContext::default(), Some("  ")),
            Err(AppError::MissingMedia)
        ));

        let payload = prepare_send(&template, &values, &CampaignContext::default(), Some("https://cdn/x.png")).unwrap();
        assert_eq!(payload.media_url.as_deref(), Some("https://cdn/x.png"));
    }

    #[test]
    fn test_payload_carries_reserved_token() {
        let template = template("Hi {CustomerName}, {Var1}", false);
        let mut values = resolved(&template);
        values.set("Var1", "welcome").unwrap();

        let payload = prepare_send(&template, &values, &CampaignContext::default(), None).unwrap();
        assert_eq!(payload.template_id, template.id);
        assert_eq!(payload.value("CustomerName"), Some(CUSTOMER_NAME_TOKEN));
        assert_eq!(payload.value("Var1"), Some("welcome"));
        assert!(payload.media_url.is_none());

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("media_url").is_none());
    }

    #[test]
    fn test_wallet_amount_from_context_unblocks_send() {
        let template = template("Credit {wallet_amount} added", false);
        let values = resolved(&template);
        let context = CampaignContext::wallet(Some("250".to_string()));

        assert_eq!(
            crate::render_preview(&template.message_content, &values, &context),
            "Credit ₹250 added"
        );
        let payload = prepare_send(&template, &values, &context, None).unwrap();
        assert_eq!(payload.value("wallet_amount"), Some("250"));

        assert!(matches!(
            prepare_send(&template, &values, &CampaignContext::default(), None),
            Err(AppError::MissingTemplateValues(_))
        ));
    }

    #[test]
    fn test_payload_values_follow_body_order() {
        let template = template("{Var2} then {Var1} then {offer}", false);
        let mut values = resolved(&template);
        values.set("Var1", "a").unwrap();
        values.set("Var2", "b").unwrap();
        values.set("offer", "c").unwrap();

        let payload =
            prepare_send(&template, &values, &CampaignContext::default(), None).unwrap();
        let keys: Vec<&str> = payload.values.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["Var2", "Var1", "offer"]);
    }

    #[test]
    fn test_stale_values_cannot_skip_new_fields() {
        let old = template("{Var1}", false);
        let mut values = resolved(&old);
        values.set("Var1", "a").unwrap();

        let new = template("{Var1} {Var2}", false);
        assert!(matches!(
            prepare_send(&new, &values, &CampaignContext::default(), None),
            Err(AppError::MissingTemplateValues(ref missing)) if missing == &vec!["Var2".to_string()]
        ));
    }
}
