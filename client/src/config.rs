use std::env;
use std::time::Duration;

use hero_geo_core::{RetryPolicy, DEFAULT_AUTH_TOKEN, DEFAULT_MAX_RETRIES, IBGE_LOCALIDADES_URL};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub hero_api: HeroApiConfig,
    pub geo_api: GeoApiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroApiConfig {
    /// Root under which `/heroes` is mounted.
    pub base_url: String,
    /// Sent verbatim as the `authorization` header on writes.
    pub auth_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hero_api: HeroApiConfig {
                base_url: HeroApiConfig::DEFAULT_BASE_URL.to_string(),
                auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            },
            geo_api: GeoApiConfig {
                base_url: IBGE_LOCALIDADES_URL.to_string(),
            },
            http: HttpConfig {
                retry: RetryPolicy::default(),
                timeout: Duration::from_secs(HttpConfig::DEFAULT_TIMEOUT_SECS),
            },
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; the process environment still applies.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Error loading .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            hero_api: HeroApiConfig::from_lookup(&lookup),
            geo_api: GeoApiConfig::from_lookup(&lookup),
            http: HttpConfig::from_lookup(&lookup)?,
        })
    }
}

impl HeroApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000";

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup("HERO_API_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            auth_token: lookup("HERO_API_AUTH_TOKEN")
                .unwrap_or_else(|| DEFAULT_AUTH_TOKEN.to_string()),
        }
    }
}

impl GeoApiConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup("IBGE_API_BASE_URL")
                .unwrap_or_else(|| IBGE_LOCALIDADES_URL.to_string()),
        }
    }
}

impl HttpConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const MAX_RETRY_COUNT: u32 = 10;

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_retries = match lookup("HTTP_RETRY_COUNT") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|count| *count <= Self::MAX_RETRY_COUNT)
                .ok_or(ConfigError::Invalid {
                    key: "HTTP_RETRY_COUNT",
                    expected: "an integer between 0 and 10",
                    value,
                })?,
            None => DEFAULT_MAX_RETRIES,
        };

        let retry_non_idempotent = match lookup("HTTP_RETRY_WRITES") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "HTTP_RETRY_WRITES",
                expected: "true or false",
                value,
            })?,
            None => false,
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "HTTP_TIMEOUT_SECS",
                    expected: "a positive number of seconds",
                    value,
                })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            retry: RetryPolicy {
                max_retries,
                retry_non_idempotent,
            },
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.hero_api.base_url, "http://localhost:3000");
        assert_eq!(config.hero_api.auth_token, "my-auth-token");
        assert_eq!(config.http.retry.max_retries, 2);
        assert!(!config.http.retry.retry_non_idempotent);
        assert_eq!(config.http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_every_key() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HERO_API_BASE_URL", "http://heroes.test/api"),
            ("HERO_API_AUTH_TOKEN", "Bearer t0ken"),
            ("IBGE_API_BASE_URL", "http://ibge.test"),
            ("HTTP_RETRY_COUNT", "0"),
            ("HTTP_RETRY_WRITES", "TRUE"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.hero_api.base_url, "http://heroes.test/api");
        assert_eq!(config.hero_api.auth_token, "Bearer t0ken");
        assert_eq!(config.geo_api.base_url, "http://ibge.test");
        assert_eq!(config.http.retry.max_retries, 0);
        assert!(config.http.retry.retry_non_idempotent);
        assert_eq!(config.http.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_retry_count() {
        let err = ClientConfig::from_lookup(lookup(&[("HTTP_RETRY_COUNT", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HTTP_RETRY_COUNT", .. }));
    }

    #[test]
    fn rejects_retry_count_above_ceiling() {
        for value in ["11", "4294967295"] {
            let err = ClientConfig::from_lookup(lookup(&[("HTTP_RETRY_COUNT", value)])).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("HTTP_RETRY_COUNT must be an integer between 0 and 10, got {value:?}")
            );
        }
        let config = ClientConfig::from_lookup(lookup(&[("HTTP_RETRY_COUNT", "10")])).unwrap();
        assert_eq!(config.http.retry.max_retries, 10);
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP_TIMEOUT_SECS must be a positive number of seconds, got \"0\""
        );
    }

    #[test]
    fn rejects_unknown_bool() {
        let err = ClientConfig::from_lookup(lookup(&[("HTTP_RETRY_WRITES", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HTTP_RETRY_WRITES", .. }));
    }
}
