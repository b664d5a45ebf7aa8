//! Cookie-backed storage area.
//!
//! [`CookieStorage`] maps every storage call onto a single read, write or delete
//! against the cookie jar behind its context handle. It keeps no copy of any
//! value: every read goes back to the jar, so it never observes stale data
//! within a request.

use crate::config::{StorageConfig, StorageConfigBuilder};
use crate::cookies::{CookieJar, CookieJarHandle};
use crate::errors::StorageError;
use crate::storage::area::StorageArea;
use crate::storage::encoding::encode_cookie_value;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

/// Key/value storage on top of the cookies of one context.
#[derive(Clone)]
pub struct CookieStorage {
    context: CookieJarHandle,
    config: StorageConfig,
}

impl Debug for CookieStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CookieStorage {
    /// Binds storage to `context` with the given cookie attributes.
    pub fn new(context: CookieJarHandle, config: StorageConfig) -> Self {
        Self { context, config }
    }

    /// Validates `config` and binds storage to `context`.
    ///
    /// Fails with [`ConfigError::MissingDomain`](crate::config::ConfigError::MissingDomain)
    /// when no domain was set.
    pub fn try_new(context: CookieJarHandle, config: StorageConfigBuilder) -> Result<Self, StorageError> {
        Ok(Self::new(context, config.build()?))
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn context(&self) -> &CookieJarHandle {
        &self.context
    }

    fn jar(&self) -> Result<RwLockReadGuard<'_, dyn CookieJar + Send + Sync + 'static>, StorageError> {
        self.context.read().map_err(|_| StorageError::ContextPoisoned)
    }

    fn jar_mut(&self) -> Result<RwLockWriteGuard<'_, dyn CookieJar + Send + Sync + 'static>, StorageError> {
        self.context.write().map_err(|_| StorageError::ContextPoisoned)
    }

    fn cookies(&self) -> Result<BTreeMap<String, String>, StorageError> {
        Ok(self.jar()?.read_cookies())
    }

    /// Stores `value` under `key` and returns it as it reads back from the jar.
    ///
    /// The value is encoded with [`encode_cookie_value`] first, so the returned
    /// string is the encoded form (`"a b"` reads back as `"a%20b"`).
    pub fn set_item(&self, key: &str, value: &str) -> Result<Option<String>, StorageError> {
        let encoded = encode_cookie_value(value);
        self.jar_mut()?
            .write_cookie(key, &encoded, &self.config.write_options())?;

        log::debug!("Stored cookie {key} for domain {}", self.config.domain());
        self.get_item(key)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cookies()?.remove(key))
    }

    /// Deletes `key` and returns the value it had just before.
    pub fn remove_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.get_item(key)?;
        self.jar_mut()?
            .delete_cookie(key, &self.config.delete_options())?;

        log::debug!("Removed cookie {key} for domain {}", self.config.domain());
        Ok(value)
    }

    /// Deletes every cookie visible in the context.
    ///
    /// Uses the same domain, path and secure attributes as [`remove_item`](Self::remove_item).
    /// Stops at the first cookie the jar fails to delete.
    pub fn clear(&self) -> Result<(), StorageError> {
        let keys: Vec<String> = self.cookies()?.into_keys().collect();
        let options = self.config.delete_options();

        let mut jar = self.jar_mut()?;
        for key in &keys {
            jar.delete_cookie(key, &options)?;
        }

        log::debug!("Cleared {} cookies for domain {}", keys.len(), self.config.domain());
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.cookies()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.cookies()?.into_keys().collect())
    }
}

impl StorageArea for CookieStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        CookieStorage::get_item(self, key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<Option<String>, StorageError> {
        CookieStorage::set_item(self, key, value)
    }

    fn remove_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        CookieStorage::remove_item(self, key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        CookieStorage::clear(self)
    }

    fn len(&self) -> Result<usize, StorageError> {
        CookieStorage::len(self)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        CookieStorage::keys(self)
    }
}
