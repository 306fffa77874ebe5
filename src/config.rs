/*
 * Responsibility
 * - Load settings from the environment (.env supported)
 * - Validate them up front (missing or invalid values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderName;
use url::Url;

// Shop signatures shorter than this are rejected.
pub const MIN_SIGNATURE_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Issuer and audience of every token, kept as configured.
    pub shop_url: String,
    pub shop_id: u32,
    // HMAC secret shared with the token issuer.
    pub jwt_signature: String,
    pub token_leeway_seconds: u64,

    pub forwarded_auth_header: HeaderName,
    pub body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signature
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("shop_url", &self.shop_url)
            .field("shop_id", &self.shop_id)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .field("forwarded_auth_header", &self.forwarded_auth_header)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = get("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = get("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let shop_url = get("SHOP_URL")
            .ok_or(ConfigError::Missing("SHOP_URL"))?
            .trim()
            .to_string();
        Url::parse(&shop_url).map_err(|_| ConfigError::Invalid("SHOP_URL"))?;

        let shop_id = match get("SHOP_ID") {
            Some(v) => v.parse::<u32>().map_err(|_| ConfigError::Invalid("SHOP_ID"))?,
            None => 1,
        };

        let jwt_signature = get("JWT_SIGNATURE").ok_or(ConfigError::Missing("JWT_SIGNATURE"))?;
        if jwt_signature.chars().count() < MIN_SIGNATURE_LENGTH {
            return Err(ConfigError::Invalid("JWT_SIGNATURE"));
        }

        let token_leeway_seconds = get("TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let forwarded_auth_header = get("AUTH_FORWARDED_HEADER")
            .unwrap_or_else(|| "x-forwarded-authorization".to_string());
        let forwarded_auth_header = HeaderName::from_bytes(forwarded_auth_header.trim().as_bytes())
            .map_err(|_| ConfigError::Invalid("AUTH_FORWARDED_HEADER"))?;

        let body_limit_bytes = get("BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(8 * 1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            shop_url,
            shop_id,
            jwt_signature,
            token_leeway_seconds,
            forwarded_auth_header,
            body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn signature() -> String {
        "s".repeat(MIN_SIGNATURE_LENGTH)
    }

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let sig = signature();
        let config = Config::from_lookup(lookup(&[
            ("SHOP_URL", "https://www.myoxidshop.com/"),
            ("JWT_SIGNATURE", &sig),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.shop_id, 1);
        assert_eq!(config.token_leeway_seconds, 60);
        assert_eq!(config.forwarded_auth_header, "x-forwarded-authorization");
        assert_eq!(config.body_limit_bytes, 8 * 1024 * 1024);
    }

    #[test]
    fn missing_shop_url_is_reported() {
        let sig = signature();
        let err = Config::from_lookup(lookup(&[("JWT_SIGNATURE", &sig)])).err();
        assert_eq!(err, Some(ConfigError::Missing("SHOP_URL")));
    }

    #[test]
    fn shop_url_must_be_absolute() {
        let sig = signature();
        let err = Config::from_lookup(lookup(&[
            ("SHOP_URL", "www.myoxidshop.com"),
            ("JWT_SIGNATURE", &sig),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("SHOP_URL")));
    }

    #[test]
    fn shop_url_is_kept_verbatim() {
        let sig = signature();
        let config = Config::from_lookup(lookup(&[
            ("SHOP_URL", " https://www.myoxidshop.com "),
            ("JWT_SIGNATURE", &sig),
        ]))
        .unwrap();
        assert_eq!(config.shop_url, "https://www.myoxidshop.com");
    }

    #[test]
    fn short_signature_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("SHOP_URL", "https://www.myoxidshop.com/"),
            ("JWT_SIGNATURE", "too-short"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("JWT_SIGNATURE")));
    }

    #[test]
    fn invalid_forwarded_header_is_rejected() {
        let sig = signature();
        let err = Config::from_lookup(lookup(&[
            ("SHOP_URL", "https://www.myoxidshop.com/"),
            ("JWT_SIGNATURE", &sig),
            ("AUTH_FORWARDED_HEADER", "not a header"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("AUTH_FORWARDED_HEADER")));
    }

    #[test]
    fn production_aliases_are_recognised() {
        assert!(AppEnv::parse("PROD").is_production());
        assert!(AppEnv::parse("production").is_production());
        assert!(!AppEnv::parse("staging").is_production());
    }
}
