//! Client-side cookie jar for a single page.
//!
//! [`DocumentCookieJar`] behaves like `document.cookie` for the page it was created
//! for: it only returns cookies whose domain, path and `Secure` flag match the
//! page URL, and it silently ignores writes a browser would refuse.
//!
//! ## Notes & limitations
//! - Cookies are kept **in memory**. Use [`DocumentCookieJar::to_json`] and
//!   [`DocumentCookieJar::from_json`] to carry a jar across sessions.
//! - A positive `Max-Age` is recorded but not enforced; a zero or negative one
//!   removes the cookie right away.
//! - Cookies are keyed by (name, domain, host-only, path). Two cookies with the same name but
//!   different paths can both be visible; the one with the longest path wins.

use crate::cookies::cookie_jar::{validate_name, validate_options};
use crate::cookies::{Cookie, CookieError, CookieJar, CookieOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// In-memory cookie jar as seen from one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCookieJar {
    /// Page the jar reads and writes cookies for.
    page_url: Url,
    /// Every stored cookie, matching or not.
    cookies: Vec<Cookie>,
}

impl DocumentCookieJar {
    /// Creates an empty jar for `page_url`.
    pub fn new(page_url: Url) -> Self {
        Self {
            page_url,
            cookies: Vec::new(),
        }
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Moves the jar to another page, keeping its cookies.
    pub fn navigate(&mut self, page_url: Url) {
        self.page_url = page_url;
    }

    /// All stored cookies, including those not visible from the current page.
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Serializes the jar, cookies and page, to JSON.
    pub fn to_json(&self) -> Result<String, CookieError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a jar produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        Ok(serde_json::from_str(json)?)
    }

    fn host(&self) -> &str {
        self.page_url.host_str().unwrap_or_default()
    }

    fn is_https(&self) -> bool {
        self.page_url.scheme() == "https"
    }

    /// Default cookie path for the page: the directory of the page path.
    fn default_path(&self) -> String {
        let path = self.page_url.path();
        path.rsplit_once('/')
            .map_or("/", |(dir, _)| if dir.is_empty() { "/" } else { dir })
            .to_string()
    }

    /// Resolves the (domain, host_only, path) slot the options address.
    ///
    /// Returns `None` when the `Domain` attribute does not cover the page host.
    fn resolve_slot(&self, options: &CookieOptions) -> Option<(String, bool, String)> {
        let host = self.host().to_ascii_lowercase();

        let (domain, host_only) = match options.domain.as_deref() {
            Some(domain) if !domain.is_empty() => {
                let domain = domain.trim_start_matches('.').to_ascii_lowercase();
                if !domain_matches(&host, &domain) {
                    return None;
                }
                (domain, false)
            }
            _ => (host, true),
        };

        let path = match options.path.as_deref() {
            Some(path) if path.starts_with('/') => path.to_string(),
            _ => self.default_path(),
        };

        Some((domain, host_only, path))
    }

    fn is_visible(&self, cookie: &Cookie) -> bool {
        let host = self.host().to_ascii_lowercase();

        let domain_ok = if cookie.host_only {
            host == cookie.domain
        } else {
            domain_matches(&host, &cookie.domain)
        };

        domain_ok && path_matches(self.page_url.path(), &cookie.path) && (!cookie.secure || self.is_https())
    }
}

/// RFC 6265 domain-match: `host` equals `domain` or is a subdomain of it.
fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// RFC 6265 path-match.
fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => rest.is_empty() || cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

impl CookieJar for DocumentCookieJar {
    fn read_cookies(&self) -> BTreeMap<String, String> {
        let mut visible: Vec<&Cookie> = self.cookies.iter().filter(|c| self.is_visible(c)).collect();
        visible.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        let mut cookies = BTreeMap::new();
        for cookie in visible {
            cookies
                .entry(cookie.name.clone())
                .or_insert_with(|| cookie.value.clone());
        }
        cookies
    }

    fn write_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError> {
        validate_name(name)?;
        validate_options(options)?;

        let Some((domain, host_only, path)) = self.resolve_slot(options) else {
            log::warn!(
                "Ignoring cookie {name}: domain {:?} does not match page host {:?}",
                options.domain,
                self.host()
            );
            return Ok(());
        };

        let secure = options.secure.unwrap_or(false);
        if secure && !self.is_https() {
            log::warn!("Ignoring secure cookie {name} on insecure page {}", self.page_url);
            return Ok(());
        }

        let cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            domain,
            host_only,
            path,
            secure,
            max_age: options.max_age.map(|d| d.whole_seconds()),
        };

        self.cookies
            .retain(|c| !c.occupies(&cookie.name, &cookie.domain, cookie.host_only, &cookie.path));
        if cookie.max_age.map_or(true, |age| age > 0) {
            self.cookies.push(cookie);
        }
        Ok(())
    }

    fn delete_cookie(&mut self, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
        validate_name(name)?;
        validate_options(options)?;

        if let Some((domain, host_only, path)) = self.resolve_slot(options) {
            self.cookies.retain(|c| !c.occupies(name, &domain, host_only, &path));
        }
        Ok(())
    }
}
