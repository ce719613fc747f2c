use std::collections::HashSet;
use std::sync::LazyLock;

use campaign_core::models::PlaceholderKey;
use regex::Regex;

/// `{...}` with no nested braces.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder token pattern is valid"));

static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^var([0-9]+)$").expect("Var pattern is valid"));

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("placeholder name pattern is valid")
});

/// Extract placeholder keys in first-appearance order.
///
/// Tokens that are neither `VarN` nor identifier-like are ignored, so stray
/// braces in free text never become fields.
pub fn extract_placeholders(body: &str) -> Vec<PlaceholderKey> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for captures in TOKEN_PATTERN.captures_iter(body) {
        let Some(name) = captures.get(1).and_then(|m| normalize_token(m.as_str())) else {
            continue;
        };
        if seen.insert(name.to_lowercase()) {
            keys.push(PlaceholderKey::new(name));
        }
    }

    keys
}

fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(captures) = VAR_PATTERN.captures(token) {
        return Some(format!("Var{}", &captures[1]));
    }

    NAME_PATTERN.is_match(token).then(|| token.to_string())
}
