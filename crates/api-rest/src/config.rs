//! Server configuration, resolved once at startup.

use anyhow::Context;
use axum::http::HeaderValue;
use std::net::SocketAddr;

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    rest_addr: SocketAddr,
    api_key: String,
    cors_origin: HeaderValue,
}

impl ServerConfig {
    /// Builds the configuration from raw environment values.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or blank, the address does not parse, or the
    /// CORS origin is not a valid header value.
    pub fn from_env_values(
        rest_addr: Option<String>,
        api_key: Option<String>,
        cors_origin: Option<String>,
    ) -> anyhow::Result<Self> {
        let rest_addr = rest_addr.unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let rest_addr: SocketAddr = rest_addr
            .trim()
            .parse()
            .with_context(|| format!("invalid DRILLS_REST_ADDR: {rest_addr}"))?;

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .context("DRILLS_API_KEY must be set")?;

        let cors_origin = cors_origin.unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        let cors_origin = HeaderValue::from_str(cors_origin.trim())
            .with_context(|| format!("invalid DRILLS_CORS_ORIGIN: {cors_origin}"))?;

        Ok(Self {
            rest_addr,
            api_key,
            cors_origin,
        })
    }

    /// Reads `DRILLS_REST_ADDR`, `DRILLS_API_KEY` and `DRILLS_CORS_ORIGIN`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_values(
            std::env::var("DRILLS_REST_ADDR").ok(),
            std::env::var("DRILLS_API_KEY").ok(),
            std::env::var("DRILLS_CORS_ORIGIN").ok(),
        )
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn cors_origin(&self) -> &HeaderValue {
        &self.cors_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ServerConfig::from_env_values(None, Some("key".into()), None).unwrap();
        assert_eq!(cfg.rest_addr(), DEFAULT_REST_ADDR.parse().unwrap());
        assert_eq!(cfg.cors_origin(), DEFAULT_CORS_ORIGIN);
        assert_eq!(cfg.api_key(), "key");
    }

    #[test]
    fn api_key_is_required() {
        assert!(ServerConfig::from_env_values(None, None, None).is_err());
        assert!(ServerConfig::from_env_values(None, Some("  ".into()), None).is_err());
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = ServerConfig::from_env_values(Some("nowhere".into()), Some("k".into()), None)
            .unwrap_err();
        assert!(err.to_string().contains("DRILLS_REST_ADDR"));
    }
}
