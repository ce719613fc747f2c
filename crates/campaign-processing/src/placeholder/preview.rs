use campaign_core::constants::WALLET_AMOUNT_KEY;
use campaign_core::models::{CampaignContext, CampaignKind};
use regex::{NoExpand, Regex};

use super::values::TemplateValues;

/// Render the live preview of `body`.
///
/// Keys with blank values keep their raw `{key}` token so the operator can see
/// what is still missing. Wallet campaigns render `{wallet_amount}` with the
/// currency symbol before the generic pass runs.
pub fn render_preview(body: &str, values: &TemplateValues, context: &CampaignContext) -> String {
    let mut rendered = body.to_string();

    if context.kind == CampaignKind::Wallet {
        let amount = context
            .entered_wallet_amount()
            .or_else(|| values.get(WALLET_AMOUNT_KEY));
        if let Some(amount) = amount.filter(|amount| !amount.trim().is_empty()) {
            let formatted = format_currency(amount, &context.currency_symbol);
            rendered = replace_token(&rendered, WALLET_AMOUNT_KEY, &formatted);
        }
    }

    for entry in values.iter() {
        if entry.value.trim().is_empty() {
            continue;
        }
        rendered = replace_token(&rendered, &entry.key.name, &entry.value);
    }

    rendered
}

fn format_currency(amount: &str, symbol: &str) -> String {
    let amount = amount.trim();
    if amount.starts_with(symbol) {
        amount.to_string()
    } else {
        format!("{}{}", symbol, amount)
    }
}

/// Replace every case-insensitive `{key}` with `value`, taken literally.
fn replace_token(body: &str, key: &str, value: &str) -> String {
    let pattern = format!(r"(?i)\{{{}\}}", regex::escape(key));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(body, NoExpand(value)).into_owned(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Skipping placeholder with unusable pattern");
            body.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::extract_placeholders;
    use campaign_core::models::BusinessIdentity;

    fn values_for(body: &str, pairs: &[(&str, &str)]) -> TemplateValues {
        let keys = extract_placeholders(body);
        let mut values = TemplateValues::resolve(&keys, None, &BusinessIdentity::default());
        for (key, value) in pairs {
            values.set(key, *value).unwrap();
        }
        values
    }

    #[test]
    fn test_substitutes_case_insensitively() {
        let body = "Get {Var1} off, {var1} only! Visit {Offer_Place}.";
        let values = values_for(body, &[("Var1", "20%"), ("offer_place", "Glow")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::default()),
            "Get 20% off, 20% only! Visit Glow."
        );
    }

    #[test]
    fn test_blank_values_leave_token_visible() {
        let body = "Hello {Var1}, see {Var2}";
        let values = values_for(body, &[("Var2", "you")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::default()),
            "Hello {Var1}, see you"
        );
    }

    #[test]
    fn test_reserved_token_survives_preview() {
        let body = "Hi {customer_name}, code {Var1}";
        let values = values_for(body, &[("Var1", "X1")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::default()),
            "Hi {customer_name}, code X1"
        );
    }

    #[test]
    fn test_wallet_amount_gets_currency_symbol() {
        let body = "Balance: {wallet_amount}";
        let values = values_for(body, &[("wallet_amount", "500")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::wallet(None)),
            "Balance: ₹500"
        );
    }

    #[test]
    fn test_wallet_amount_with_symbol_is_not_prefixed_twice() {
        let body = "Balance: {Wallet_Amount}";
        let values = values_for(body, &[("wallet_amount", "₹ 750")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::wallet(None)),
            "Balance: ₹ 750"
        );
    }

    #[test]
    fn test_wallet_amount_from_context_wins() {
        let body = "Credit {wallet_amount} added";
        let values = values_for(body, &[("wallet_amount", "100")]);
        let context = CampaignContext::wallet(Some("250".to_string())).with_currency_symbol("$");
        assert_eq!(render_preview(body, &values, &context), "Credit $250 added");
    }

    #[test]
    fn test_standard_campaign_does_not_format_wallet_amount() {
        let body = "Balance: {wallet_amount}";
        let values = values_for(body, &[("wallet_amount", "500")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::default()),
            "Balance: 500"
        );
    }

    #[test]
    fn test_replacement_text_is_literal() {
        let body = "Price {Var1}";
        let values = values_for(body, &[("Var1", "$1 and ${2}")]);
        assert_eq!(
            render_preview(body, &values, &CampaignContext::default()),
            "Price $1 and ${2}"
        );
    }
}
