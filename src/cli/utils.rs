//! Shared CLI utilities.

use cmdkit::config::StringMap;

/// Parse one `key=value` pair; everything after the first `=` is the value.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

/// Overlay `overrides` onto `base`; later pairs win.
pub fn merge_params(base: &StringMap, overrides: &[(String, String)]) -> StringMap {
    let mut merged = base.clone();
    merged.extend(overrides.iter().cloned());
    merged
}

/// Character limit from a signed setting; negative limits are rejected.
pub fn char_limit(limit: i64) -> anyhow::Result<usize> {
    usize::try_from(limit).map_err(|_| anyhow::anyhow!("Limit must not be negative: {limit}"))
}
