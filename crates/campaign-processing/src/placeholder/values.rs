use campaign_core::constants::{CUSTOMER_NAME_TOKEN, WALLET_AMOUNT_KEY};
use campaign_core::models::{BusinessField, BusinessIdentity, CampaignContext, PlaceholderKey};
use campaign_core::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateValue {
    pub key: PlaceholderKey,
    pub value: String,
}

/// Values for one (campaign, template) pair, in field presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateValues {
    entries: Vec<TemplateValue>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl TemplateValues {
    /// Seed values for `keys`.
    ///
    /// Values in `previous` are kept for keys still present; pass `None` when
    /// the template itself changed. Blank business fields are filled once from
    /// `business`. Reserved keys always hold [`CUSTOMER_NAME_TOKEN`].
    pub fn resolve(
        keys: &[PlaceholderKey],
        previous: Option<&TemplateValues>,
        business: &BusinessIdentity,
    ) -> Self {
        let entries = keys
            .iter()
            .map(|key| {
                let value = if key.is_reserved() {
                    CUSTOMER_NAME_TOKEN.to_string()
                } else {
                    let carried = previous
                        .and_then(|p| p.get(&key.name))
                        .map(str::to_string)
                        .unwrap_or_default();
                    if is_blank(&carried) {
                        business_default(key, business).unwrap_or(carried)
                    } else {
                        carried
                    }
                };
                TemplateValue {
                    key: key.clone(),
                    value,
                }
            })
            .collect();

        Self { entries }
    }

    /// Set an operator-entered value. Reserved keys cannot be edited.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), AppError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.key.matches(name))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown placeholder: {}", name)))?;

        if entry.key.is_reserved() {
            return Err(AppError::ReadOnlyPlaceholder(entry.key.name.clone()));
        }

        entry.value = value.into();
        Ok(())
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.matches(name))
            .map(|entry| entry.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &PlaceholderKey> {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-reserved keys among `keys` whose value here is blank or absent.
    pub fn missing_for(&self, keys: &[PlaceholderKey]) -> Vec<String> {
        keys.iter()
            .filter(|key| !key.is_reserved())
            .filter(|key| self.get(&key.name).map_or(true, is_blank))
            .map(|key| key.name.clone())
            .collect()
    }

    pub fn missing_required(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| !entry.key.is_reserved() && is_blank(&entry.value))
            .map(|entry| entry.key.name.clone())
            .collect()
    }

    /// Fail with every missing key listed, not just the first.
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingTemplateValues(missing))
        }
    }

    /// Fill `wallet_amount` from the amount entered on a wallet campaign.
    ///
    /// The campaign amount wins over a value typed into the map, matching what
    /// the preview shows. Templates without the key are left untouched.
    pub fn apply_context(&mut self, context: &CampaignContext) {
        let Some(amount) = context.entered_wallet_amount() else {
            return;
        };
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.key.matches(WALLET_AMOUNT_KEY))
        {
            entry.value = amount.trim().to_string();
        }
    }
}

fn business_default(key: &PlaceholderKey, business: &BusinessIdentity) -> Option<String> {
    let known = match key.business_field()? {
        BusinessField::Name => business.name.as_deref(),
        BusinessField::Phone => business.phone.as_deref(),
    }?;
    (!is_blank(known)).then(|| known.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::extract_placeholders;

    fn business() -> BusinessIdentity {
        BusinessIdentity {
            name: Some("Glow Salon".to_string()),
            phone: Some("+91 98765 43210".to_string()),
        }
    }

    #[test]
    fn test_seeds_every_key_blank() {
        let keys = extract_placeholders("{Var1} {offer}");
        let values = TemplateValues::resolve(&keys, None, &BusinessIdentity::default());
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("var1"), Some(""));
        assert_eq!(values.get("offer"), Some(""));
    }

    #[test]
    fn test_reserved_key_forced_to_token() {
        let keys = extract_placeholders("Hi {CustomerName}");
        let mut previous = TemplateValues::resolve(&keys, None, &business());
        previous.entries[0].value = "Asha".to_string();

        let values = TemplateValues::resolve(&keys, Some(&previous), &business());
        assert_eq!(values.get("customername"), Some("{customer_name}"));
    }

    #[test]
    fn test_reserved_key_cannot_be_set() {
        let keys = extract_placeholders("Hi {customer_name}");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        let err = values.set("Customer_Name", "Asha").unwrap_err();
        assert!(matches!(err, AppError::ReadOnlyPlaceholder(_)));
        assert_eq!(values.get("customer_name"), Some("{customer_name}"));
    }

    #[test]
    fn test_business_fields_auto_fill_once() {
        let keys = extract_placeholders("{Business_Name} {business_phone}");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        assert_eq!(values.get("business_name"), Some("Glow Salon"));
        assert_eq!(values.get("business_phone"), Some("+91 98765 43210"));

        values.set("business_name", "Glow Salon Indiranagar").unwrap();
        let values = TemplateValues::resolve(&keys, Some(&values), &business());
        assert_eq!(values.get("business_name"), Some("Glow Salon Indiranagar"));
    }

    #[test]
    fn test_unknown_business_identity_leaves_blank() {
        let keys = extract_placeholders("{business_name}");
        let values = TemplateValues::resolve(&keys, None, &BusinessIdentity::default());
        assert_eq!(values.get("business_name"), Some(""));
    }

    #[test]
    fn test_carries_over_values_for_keys_still_present() {
        let old_keys = extract_placeholders("{Var1} {offer}");
        let mut previous = TemplateValues::resolve(&old_keys, None, &business());
        previous.set("Var1", "20%").unwrap();
        previous.set("offer", "Haircut").unwrap();

        let new_keys = extract_placeholders("{var1} {expiry}");
        let values = TemplateValues::resolve(&new_keys, Some(&previous), &business());
        assert_eq!(values.get("Var1"), Some("20%"));
        assert_eq!(values.get("expiry"), Some(""));
        assert_eq!(values.get("offer"), None);
    }

    #[test]
    fn test_set_unknown_key_is_invalid_input() {
        let mut values = TemplateValues::default();
        assert!(matches!(
            values.set("Var1", "x"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_lists_every_blank_key_except_reserved() {
        let keys = extract_placeholders("{customer_name} {Var1} {offer} {Var2}");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        values.set("offer", "  ").unwrap();
        values.set("Var2", "ok").unwrap();

        assert_eq!(values.missing_required(), vec!["Var1", "offer"]);
        match values.ensure_complete() {
            Err(AppError::MissingTemplateValues(missing)) => {
                assert_eq!(missing, vec!["Var1", "offer"])
            }
            other => panic!("expected missing values, got {:?}", other),
        }

        values.set("Var1", "a").unwrap();
        values.set("offer", "b").unwrap();
        assert!(values.ensure_complete().is_ok());
    }

    #[test]
    fn test_wallet_context_fills_wallet_amount() {
        let keys = extract_placeholders("Credit {Wallet_Amount} added");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        assert_eq!(values.missing_required(), vec!["Wallet_Amount"]);

        values.apply_context(&CampaignContext::wallet(Some(" 250 ".to_string())));
        assert_eq!(values.get("wallet_amount"), Some("250"));
        assert!(values.ensure_complete().is_ok());
    }

    #[test]
    fn test_standard_context_leaves_wallet_amount() {
        let keys = extract_placeholders("Credit {wallet_amount}");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        values.apply_context(&CampaignContext::default());
        values.apply_context(&CampaignContext::wallet(Some("  ".to_string())));
        assert_eq!(values.missing_required(), vec!["wallet_amount"]);
    }

    #[test]
    fn test_missing_for_checks_against_other_keys() {
        let keys = extract_placeholders("{Var1}");
        let mut values = TemplateValues::resolve(&keys, None, &business());
        values.set("Var1", "x").unwrap();

        let other = extract_placeholders("{Var1} {Var2}");
        assert_eq!(values.missing_for(&other), vec!["Var2"]);
    }
}
