//! Cookie jar abstraction.
//!
//! A **cookie jar** holds the cookies visible to one request (server side) or one
//! page (client side). Storage reads and writes cookies only through this trait,
//! so the header format and the scoping rules stay inside the jar.
//!
//! Two implementations live in this crate:
//! - [`RequestContext`](crate::cookies::RequestContext): seeded from the request's
//!   `Cookie` header, records changes as outgoing `Set-Cookie` headers.
//! - [`DocumentCookieJar`](crate::cookies::DocumentCookieJar): an in-memory client
//!   jar scoped to the current page URL.
//!
//! Jars are **not** internally synchronized. Share them through a
//! [`CookieJarHandle`](crate::cookies::CookieJarHandle).

use crate::cookies::CookieError;
use std::collections::BTreeMap;
use time::Duration;

/// Attributes applied when writing or deleting a cookie.
///
/// `None` leaves the attribute to the jar's default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub max_age: Option<Duration>,
}

/// Read/write/delete access to the cookies of one context.
pub trait CookieJar: Send + Sync {
    /// Returns every cookie currently visible, by name.
    ///
    /// Implementations parse their live state on every call.
    fn read_cookies(&self) -> BTreeMap<String, String>;

    /// Writes (or replaces) the cookie `name` with `value` and the given attributes.
    fn write_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError>;

    /// Expires the cookie `name` immediately.
    ///
    /// `options.max_age` is ignored. Deleting an absent cookie is not an error.
    fn delete_cookie(&mut self, name: &str, options: &CookieOptions) -> Result<(), CookieError>;
}

/// Separators that may not appear in a cookie name (RFC 6265 token).
const NAME_SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={}";

pub(crate) fn validate_name(name: &str) -> Result<(), CookieError> {
    let is_token = |b: u8| b.is_ascii_graphic() && !NAME_SEPARATORS.contains(&b);

    if name.is_empty() || !name.bytes().all(is_token) {
        return Err(CookieError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_options(options: &CookieOptions) -> Result<(), CookieError> {
    let attributes = [("Path", options.path.as_deref()), ("Domain", options.domain.as_deref())];

    for (attribute, value) in attributes {
        if let Some(value) = value {
            if value.bytes().any(|b| b == b';' || b.is_ascii_control()) {
                return Err(CookieError::InvalidAttribute {
                    attribute,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(())
}
