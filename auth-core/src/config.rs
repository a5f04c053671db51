//! Configuration management for the auth kernel
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! # Example
//!
//! ```no_run
//! use auth_core::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::from_env()?;
//!     println!("access TTL: {}s", settings.jwt.access_ttl_secs);
//!     Ok(())
//! }
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Secrets shorter than this are treated as misconfiguration.
const MIN_SECRET_BYTES: usize = 32;

/// Placeholder secrets that must never reach a running deployment.
const PLACEHOLDER_SECRETS: &[&str] = &["changeme", "change-me", "dev-secret-change-me", "secret"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub jwt: JwtSettings,
}

impl Settings {
    /// Load settings from environment variables, reading a `.env` file
    /// first in development builds.
    pub fn from_env() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            jwt: JwtSettings::from_env()?,
        })
    }
}

/// JWT signing and lifetime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// Process-wide HS256 signing secret, loaded once at startup.
    pub secret: String,
    /// Access-token lifetime in seconds (short-lived).
    pub access_ttl_secs: u64,
    /// Refresh-token lifetime in seconds (long-lived).
    pub refresh_ttl_secs: u64,
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        // An absent or default/dev secret is a deployment error; refuse to
        // start rather than sign tokens anyone can forge.
        if PLACEHOLDER_SECRETS.contains(&secret.to_ascii_lowercase().as_str()) {
            bail!("JWT_SECRET is a placeholder value; configure a real secret");
        }
        if secret.len() < MIN_SECRET_BYTES {
            bail!("JWT_SECRET must be at least {} bytes", MIN_SECRET_BYTES);
        }

        Ok(Self {
            secret,
            access_ttl_secs: env::var("JWT_ACCESS_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("Invalid JWT_ACCESS_TTL_SECS")?,
            refresh_ttl_secs: env::var("JWT_REFRESH_TTL_SECS")
                .unwrap_or_else(|_| "2592000".to_string())
                .parse()
                .context("Invalid JWT_REFRESH_TTL_SECS")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("JWT_SECRET");
        env::remove_var("JWT_ACCESS_TTL_SECS");
        env::remove_var("JWT_REFRESH_TTL_SECS");
    }

    #[test]
    #[serial]
    fn test_jwt_settings_from_env() {
        clear_env();
        env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
        env::set_var("JWT_ACCESS_TTL_SECS", "600");

        let settings = JwtSettings::from_env().unwrap();

        assert_eq!(settings.secret, "0123456789abcdef0123456789abcdef");
        assert_eq!(settings.access_ttl_secs, 600);
        assert_eq!(settings.refresh_ttl_secs, 2_592_000); // Default

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_an_error() {
        clear_env();
        assert!(JwtSettings::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_short_secret_is_rejected() {
        clear_env();
        env::set_var("JWT_SECRET", "too-short");

        assert!(JwtSettings::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_placeholder_secret_is_rejected() {
        clear_env();
        env::set_var("JWT_SECRET", "dev-secret-change-me");

        let err = JwtSettings::from_env().unwrap_err();
        assert!(err.to_string().contains("placeholder"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_ttl_is_rejected() {
        clear_env();
        env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
        env::set_var("JWT_ACCESS_TTL_SECS", "not-a-number");

        assert!(JwtSettings::from_env().is_err());

        clear_env();
    }
}
