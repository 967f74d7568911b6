//! Helpers for API key resolution and timestamp formatting.

use crate::error::ConfigError;
use chrono::{DateTime, Utc};

/// Primary environment variable holding the Hevy API key.
pub const API_KEY_ENV: &str = "HEVY_API_KEY";
/// Fallback variable name, kept for existing `.env` files.
pub const API_KEY_ENV_FALLBACK: &str = "API_KEY";

/// Source from which the API key was obtained (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    HevyApiKey,
    ApiKey,
}

impl ApiKeySource {
    pub fn var_name(&self) -> &'static str {
        match self {
            ApiKeySource::HevyApiKey => API_KEY_ENV,
            ApiKeySource::ApiKey => API_KEY_ENV_FALLBACK,
        }
    }
}

/// Get the API key from `HEVY_API_KEY`, falling back to `API_KEY`.
///
/// Blank values are treated as unset.
pub fn get_api_key() -> Result<(String, ApiKeySource), ConfigError> {
    resolve_api_key(|name| std::env::var(name).ok())
}

fn resolve_api_key(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(String, ApiKeySource), ConfigError> {
    for source in [ApiKeySource::HevyApiKey, ApiKeySource::ApiKey] {
        if let Some(k) = lookup(source.var_name()) {
            let k = k.trim();
            if !k.is_empty() {
                return Ok((k.to_string(), source));
            }
        }
    }
    Err(ConfigError::new(format!(
        "API key not found. Set {} (or {}) in the environment or a .env file.",
        API_KEY_ENV, API_KEY_ENV_FALLBACK
    )))
}

/// Format time as ISO 8601 for the API.
pub fn format_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse ISO 8601 time string.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim().trim_end_matches('Z').trim_end_matches('z');
    let parsed = chrono::DateTime::parse_from_rfc3339(&format!("{}Z", s))
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(s))
        .map_err(|e| e.to_string())?;
    Ok(parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn prefers_hevy_api_key() {
        let (key, source) =
            resolve_api_key(env(&[("HEVY_API_KEY", "abc"), ("API_KEY", "xyz")])).unwrap();
        assert_eq!(key, "abc");
        assert_eq!(source, ApiKeySource::HevyApiKey);
    }

    #[test]
    fn falls_back_to_api_key_when_primary_blank() {
        let (key, source) =
            resolve_api_key(env(&[("HEVY_API_KEY", "  "), ("API_KEY", "xyz")])).unwrap();
        assert_eq!(key, "xyz");
        assert_eq!(source, ApiKeySource::ApiKey);
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = resolve_api_key(env(&[])).unwrap_err();
        assert!(err.message.contains("HEVY_API_KEY"));
    }

    #[test]
    fn format_epoch() {
        assert_eq!(format_time(DateTime::<Utc>::UNIX_EPOCH), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn parse_time_accepts_offsets_and_bare_utc() {
        let a = parse_time("2025-07-23T01:00:00Z").unwrap();
        let b = parse_time("2025-07-23T03:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(format_time(a), "2025-07-23T01:00:00Z");
    }
}
