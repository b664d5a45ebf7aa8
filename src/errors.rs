use crate::config::ConfigError;
use crate::cookies::CookieError;

/// Errors returned by [`CookieStorage`](crate::storage::CookieStorage) operations.
///
/// Cookie jar errors are wrapped as-is so callers see exactly what the jar reported.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cookie(#[from] CookieError),

    #[error("Cookie context lock is poisoned")]
    ContextPoisoned,
}
