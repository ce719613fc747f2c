use serde::{Deserialize, Serialize};

/// Whether the operator may fill a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    /// Resolved per recipient by the send pipeline; never edited here.
    Reserved,
    Editable,
}

/// Business identity fields that can seed a blank placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessField {
    Name,
    Phone,
}

/// A normalized placeholder name as it appears in a template body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderKey {
    pub name: String,
    pub kind: PlaceholderKind,
}

impl PlaceholderKey {
    /// Build a key from an already-normalized name, deciding its kind once.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if is_customer_name(&name) {
            PlaceholderKind::Reserved
        } else {
            PlaceholderKind::Editable
        };
        Self { name, kind }
    }

    pub fn is_reserved(&self) -> bool {
        self.kind == PlaceholderKind::Reserved
    }

    /// Case-insensitive comparison against another placeholder name.
    pub fn matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }

    pub fn business_field(&self) -> Option<BusinessField> {
        if self.matches("business_name") {
            Some(BusinessField::Name)
        } else if self.matches("business_phone") {
            Some(BusinessField::Phone)
        } else {
            None
        }
    }
}

fn is_customer_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("customer_name") || name.eq_ignore_ascii_case("customername")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_name_variants_are_reserved() {
        assert!(PlaceholderKey::new("customer_name").is_reserved());
        assert!(PlaceholderKey::new("CustomerName").is_reserved());
        assert!(PlaceholderKey::new("CUSTOMER_NAME").is_reserved());
        assert!(!PlaceholderKey::new("customer").is_reserved());
    }

    #[test]
    fn test_business_fields() {
        assert_eq!(
            PlaceholderKey::new("Business_Name").business_field(),
            Some(BusinessField::Name)
        );
        assert_eq!(
            PlaceholderKey::new("business_phone").business_field(),
            Some(BusinessField::Phone)
        );
        assert_eq!(PlaceholderKey::new("Var1").business_field(), None);
    }
}
