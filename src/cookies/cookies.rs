//! Cookie core types.
//!
//! This module defines the **type-erased handle** through which storage reaches a
//! cookie jar, the serializable [`Cookie`] record kept by client-side jars, and the
//! [`CookieError`] every jar reports.
//!
//! # Concurrency model
//! - [`CookieJarHandle`] is `Arc<RwLock<dyn CookieJar + Send + Sync>>`.
//!   - Callers take a **read lock** to read cookies and a **write lock** to write or
//!     delete them.
//!   - A handle belongs to one request (server) or one page (client). It is never a
//!     process-wide singleton.
//!
//! ```rust
//! use std::sync::{Arc, RwLock};
//! use cookie_storage::cookies::{CookieJar, CookieJarHandle, RequestContext};
//!
//! let ctx = Arc::new(RwLock::new(RequestContext::from_cookie_header("theme=dark")));
//! let handle: CookieJarHandle = ctx.clone();
//! assert_eq!(handle.read().unwrap().read_cookies().get("theme").map(String::as_str), Some("dark"));
//! ```

use crate::cookies::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A handle to a cookie jar trait.
///
/// This is a reference-counted, read/write-locked pointer to a type-erased
/// [`CookieJar`]. Obtain a **read lock** for queries and a **write lock** for
/// mutations.
pub type CookieJarHandle = Arc<RwLock<dyn CookieJar + Send + Sync>>;

/// A cookie as kept by a client-side jar.
///
/// Suitable for persistence via `serde`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Cookie value exactly as written.
    pub value: String,

    /// Domain the cookie is scoped to, without a leading dot.
    pub domain: String,

    /// `true` when the cookie was written without a `Domain` attribute and only
    /// matches `domain` exactly.
    pub host_only: bool,

    /// Path scoping (e.g., `"/"`).
    pub path: String,

    /// If `true`, cookie is visible only on https pages.
    pub secure: bool,

    /// Lifetime in seconds as written. `None` for session cookies.
    pub max_age: Option<i64>,
}

impl Cookie {
    /// Returns `true` when this cookie occupies the slot (name, domain, host-only, path).
    pub fn occupies(&self, name: &str, domain: &str, host_only: bool, path: &str) -> bool {
        self.name == name && self.domain == domain && self.host_only == host_only && self.path == path
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Invalid cookie {attribute} attribute: {value:?}")]
    InvalidAttribute { attribute: &'static str, value: String },

    #[error("Invalid Set-Cookie header: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Cookie jar snapshot failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
