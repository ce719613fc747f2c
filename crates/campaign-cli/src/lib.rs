//! Helpers shared by the `campaign` binary.

use std::path::Path;

use anyhow::Context;
use campaign_processing::TemplateValues;

/// Parse a `key=value` pair. The value may itself contain `=`.
pub fn parse_value_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Apply operator values, reporting keys that are unknown or read-only.
pub fn apply_values(
    values: &mut TemplateValues,
    pairs: &[(String, String)],
) -> anyhow::Result<()> {
    for (key, value) in pairs {
        values
            .set(key, value.clone())
            .with_context(|| format!("Cannot set '{}'", key))?;
    }
    Ok(())
}

/// Template body from `--body` or a file, in that order of preference.
pub fn read_body(body: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    match (body, file) {
        (Some(body), _) => Ok(body),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display())),
        (None, None) => Err(anyhow::anyhow!("Provide --body or --template-file")),
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
