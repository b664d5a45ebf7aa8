//! Cookie storage configuration.
//!
//! `StorageConfig` holds the cookie attributes a
//! [`CookieStorage`](crate::storage::CookieStorage) applies to every cookie it
//! writes. The attributes are fixed once the config is built: there are getters
//! but no setters.
//!
//! # Examples
//!
//! ## Defaults
//! ```rust
//! use cookie_storage::config::StorageConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = StorageConfig::builder().domain("example.com").build()?;
//! assert_eq!(cfg.path(), "/");
//! assert_eq!(cfg.expires(), 365);
//! assert!(cfg.secure());
//! # Ok(()) }
//! ```
//!
//! ## Customize
//! ```rust
//! use cookie_storage::config::StorageConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = StorageConfig::builder()
//!     .domain("shop.example.com")
//!     .path("/account")
//!     .expires(30)
//!     .secure(false)
//!     .build()?;
//! assert_eq!(cfg.max_age().whole_seconds(), 30 * 86_400);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `domain`: Cookie `Domain` attribute. Required.
//! - `path`: Cookie `Path` attribute (default: `/`).
//! - `expires`: Lifetime in days, written as `Max-Age` seconds (default: 365).
//! - `secure`: Cookie `Secure` flag (default: `true`).
//!
//! # Errors
//!
//! [`StorageConfigBuilder::build`] returns [`ConfigError::MissingDomain`] when no
//! domain (or an empty one) was given.

use crate::cookies::CookieOptions;
use time::Duration;

const DEFAULT_PATH: &str = "/";
const DEFAULT_EXPIRES_DAYS: u32 = 365;
const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    domain: String,
    path: String,
    expires: u32,
    secure: bool,
}

impl StorageConfig {
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Cookie lifetime in days.
    pub fn expires(&self) -> u32 {
        self.expires
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Cookie lifetime as a `Max-Age` duration (`expires * 86400` seconds).
    pub fn max_age(&self) -> Duration {
        Duration::seconds(i64::from(self.expires) * SECONDS_PER_DAY)
    }

    /// Options used when writing a cookie.
    pub fn write_options(&self) -> CookieOptions {
        CookieOptions {
            max_age: Some(self.max_age()),
            ..self.delete_options()
        }
    }

    /// Options used when deleting a cookie. Carries no max-age; the jar expires the
    /// cookie immediately.
    pub fn delete_options(&self) -> CookieOptions {
        CookieOptions {
            path: Some(self.path.clone()),
            domain: Some(self.domain.clone()),
            secure: Some(self.secure),
            max_age: None,
        }
    }
}

/// Builder for [`StorageConfig`], in the same fluent style as the rest of the crate.
#[derive(Debug, Clone)]
pub struct StorageConfigBuilder {
    pub domain: Option<String>,
    pub path: String,
    /// Lifetime in days.
    pub expires: u32,
    pub secure: bool,
}

impl Default for StorageConfigBuilder {
    fn default() -> Self {
        Self {
            domain: None,
            path: DEFAULT_PATH.to_string(),
            expires: DEFAULT_EXPIRES_DAYS,
            secure: true,
        }
    }
}

impl StorageConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    pub fn domain<S: Into<String>>(self, domain: S) -> Self { self.map(|b| b.domain = Some(domain.into())) }
    pub fn path<S: Into<String>>(self, path: S) -> Self { self.map(|b| b.path = path.into()) }
    pub fn expires(self, days: u32) -> Self { self.map(|b| b.expires = days) }
    pub fn secure(self, on: bool) -> Self { self.map(|b| b.secure = on) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut StorageConfigBuilder)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<StorageConfig, ConfigError> {
        let domain = match self.domain {
            Some(domain) if !domain.is_empty() => domain,
            _ => return Err(ConfigError::MissingDomain),
        };

        Ok(StorageConfig {
            domain,
            path: self.path,
            expires: self.expires,
            secure: self.secure,
        })
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("The domain of cookie storage can not be empty")]
    MissingDomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_domain_is_set() {
        let cfg = StorageConfig::builder().domain("example.com").build().unwrap();
        assert_eq!(cfg.domain(), "example.com");
        assert_eq!(cfg.path(), "/");
        assert_eq!(cfg.expires(), 365);
        assert!(cfg.secure());
        assert_eq!(cfg.max_age().whole_seconds(), 31_536_000);
    }

    #[test]
    fn missing_domain_is_rejected_regardless_of_other_options() {
        let err = StorageConfig::builder()
            .path("/app")
            .expires(7)
            .secure(false)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingDomain);

        assert_eq!(StorageConfig::builder().build().unwrap_err(), ConfigError::MissingDomain);
    }

    #[test]
    fn empty_domain_is_rejected() {
        let err = StorageConfig::builder().domain("").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingDomain);
    }

    #[test]
    fn with_applies_several_changes() {
        let cfg = StorageConfig::builder()
            .with(|b| {
                b.domain = Some("example.org".into());
                b.path = "/shop".into();
                b.expires = 1;
            })
            .build()
            .unwrap();
        assert_eq!(cfg.domain(), "example.org");
        assert_eq!(cfg.path(), "/shop");
        assert_eq!(cfg.max_age().whole_seconds(), 86_400);

        let err = StorageConfig::builder()
            .domain("example.org")
            .with(|b| b.domain = None)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingDomain);
    }

    #[test]
    fn delete_options_carry_no_max_age() {
        let cfg = StorageConfig::builder().domain("example.com").path("/a").build().unwrap();

        let write = cfg.write_options();
        assert_eq!(write.max_age, Some(Duration::days(365)));
        assert_eq!(write.path.as_deref(), Some("/a"));

        let delete = cfg.delete_options();
        assert_eq!(delete.max_age, None);
        assert_eq!(delete.domain.as_deref(), Some("example.com"));
        assert_eq!(delete.secure, Some(true));
    }
}
