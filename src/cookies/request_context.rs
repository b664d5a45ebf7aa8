//! Server-side cookie jar for a single request.
//!
//! A [`RequestContext`] is created from the incoming request's `Cookie` header(s)
//! and collects every write and deletion made while the request is handled. Reads
//! always see the request cookies with those changes applied. When the response is
//! built, the changes are emitted as `Set-Cookie` headers.
//!
//! Header parsing and serialization are delegated to the `cookie` crate. Values
//! are unquoted and percent-decoded when read from the request (a value that does
//! not decode to UTF-8 is kept as sent) and percent-encoded when written to
//! `Set-Cookie`, so a value read back is exactly the value that was written.
//!
//! ```rust
//! use cookie_storage::cookies::{CookieJar, CookieOptions, RequestContext};
//!
//! let mut ctx = RequestContext::from_cookie_header("theme=dark; lang=en");
//! ctx.write_cookie("lang", "nl", &CookieOptions::default()).unwrap();
//!
//! let cookies = ctx.read_cookies();
//! assert_eq!(cookies["theme"], "dark");
//! assert_eq!(cookies["lang"], "nl");
//! assert_eq!(ctx.set_cookie_headers().unwrap().len(), 1);
//! ```

use crate::cookies::cookie_jar::{validate_name, validate_options};
use crate::cookies::{CookieError, CookieJar, CookieOptions};
use cookie::Cookie;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, Request, Response};
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;

/// Cookie state of one request/response cycle.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request cookies as originals, this request's changes as delta.
    jar: cookie::CookieJar,
}

impl RequestContext {
    /// Creates a context for a request that carried no cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from a raw `Cookie` header value (`a=1; b=2`).
    pub fn from_cookie_header(header: &str) -> Self {
        let mut ctx = Self::new();
        ctx.add_request_cookies(header);
        ctx
    }

    /// Creates a context from all `Cookie` headers in `headers`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut ctx = Self::new();
        for value in headers.get_all(COOKIE) {
            match value.to_str() {
                Ok(header) => ctx.add_request_cookies(header),
                Err(e) => log::debug!("Skipping Cookie header with opaque bytes: {e}"),
            }
        }
        ctx
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_headers(request.headers())
    }

    fn add_request_cookies(&mut self, header: &str) {
        for parsed in Cookie::split_parse(header) {
            match parsed {
                Ok(cookie) => {
                    let value = decode_request_value(cookie.value_trimmed());
                    self.jar.add_original(Cookie::new(cookie.name().to_string(), value));
                }
                Err(e) => log::debug!("Skipping malformed request cookie: {e}"),
            }
        }
    }

    /// Returns one `Set-Cookie` value per cookie written or deleted in this context.
    pub fn set_cookie_headers(&self) -> Result<Vec<HeaderValue>, CookieError> {
        self.jar
            .delta()
            .map(|cookie| HeaderValue::from_str(&cookie.encoded().to_string()).map_err(CookieError::from))
            .collect()
    }

    /// Appends the pending `Set-Cookie` headers to `headers`.
    pub fn write_response_headers(&self, headers: &mut HeaderMap) -> Result<(), CookieError> {
        for value in self.set_cookie_headers()? {
            headers.append(SET_COOKIE, value);
        }
        Ok(())
    }

    pub fn apply_to_response<B>(&self, response: &mut Response<B>) -> Result<(), CookieError> {
        self.write_response_headers(response.headers_mut())
    }
}

/// Percent-decodes a request cookie value. Values that do not decode to UTF-8
/// are kept as sent.
fn decode_request_value(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn build_cookie(name: &str, value: &str, options: &CookieOptions) -> Cookie<'static> {
    let mut builder = Cookie::build((name.to_owned(), value.to_owned()));
    if let Some(path) = &options.path {
        builder = builder.path(path.clone());
    }
    if let Some(domain) = &options.domain {
        builder = builder.domain(domain.clone());
    }
    if let Some(secure) = options.secure {
        builder = builder.secure(secure);
    }
    if let Some(max_age) = options.max_age {
        builder = builder.max_age(max_age);
    }
    builder.build()
}

impl CookieJar for RequestContext {
    fn read_cookies(&self) -> BTreeMap<String, String> {
        self.jar
            .iter()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect()
    }

    fn write_cookie(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError> {
        validate_name(name)?;
        validate_options(options)?;

        self.jar.add(build_cookie(name, value, options));
        Ok(())
    }

    fn delete_cookie(&mut self, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
        validate_name(name)?;
        validate_options(options)?;

        // Cookies that came with the request get a removal Set-Cookie; cookies
        // written during this request are just dropped from the delta.
        let options = CookieOptions {
            max_age: None,
            ..options.clone()
        };
        self.jar.remove(build_cookie(name, "", &options));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn site_options() -> CookieOptions {
        CookieOptions {
            path: Some("/".into()),
            domain: Some("example.com".into()),
            secure: Some(true),
            max_age: Some(Duration::seconds(31_536_000)),
        }
    }

    fn headers_as_strings(ctx: &RequestContext) -> Vec<String> {
        ctx.set_cookie_headers()
            .unwrap()
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn request_cookies_are_parsed_and_decoded() {
        let ctx = RequestContext::from_cookie_header("theme=dark; note=a%20b;  lang=en");
        let cookies = ctx.read_cookies();

        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies["theme"], "dark");
        assert_eq!(cookies["note"], "a b");
        assert_eq!(cookies["lang"], "en");
        assert!(ctx.set_cookie_headers().unwrap().is_empty());
    }

    #[test]
    fn multiple_cookie_headers_are_merged() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2; c=3"));

        let request = {
            let mut builder = Request::builder().uri("https://example.com/");
            for value in headers.get_all(COOKIE) {
                builder = builder.header(COOKIE, value.clone());
            }
            builder.body(()).unwrap()
        };

        assert_eq!(RequestContext::from_headers(&headers).read_cookies().len(), 3);
        assert_eq!(RequestContext::from_request(&request).read_cookies().len(), 3);
    }

    #[test]
    fn undecodable_values_are_kept_raw() {
        let ctx = RequestContext::from_cookie_header("a=%FF; c=%ZZ; d=%E2%82%AC");
        let cookies = ctx.read_cookies();

        assert_eq!(cookies["a"], "%FF");
        assert_eq!(cookies["c"], "%ZZ");
        assert_eq!(cookies["d"], "\u{20ac}");
    }

    #[test]
    fn quoted_values_are_unquoted() {
        let ctx = RequestContext::from_cookie_header("b=\"q\"; e=\"a%20b\"");
        let cookies = ctx.read_cookies();

        assert_eq!(cookies["b"], "q");
        assert_eq!(cookies["e"], "a b");
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let ctx = RequestContext::from_cookie_header("good=1; ; =nameless; bare");
        let cookies = ctx.read_cookies();

        assert_eq!(cookies.get("good").map(String::as_str), Some("1"));
        assert!(!cookies.contains_key(""));
    }

    #[test]
    fn write_emits_set_cookie_with_attributes() {
        let mut ctx = RequestContext::new();
        ctx.write_cookie("theme", "dark", &site_options()).unwrap();

        assert_eq!(ctx.read_cookies()["theme"], "dark");

        let headers = headers_as_strings(&ctx);
        assert_eq!(headers.len(), 1);
        let header = &headers[0];
        assert!(header.starts_with("theme=dark"));
        assert!(header.contains("Domain=example.com"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=31536000"));
        assert!(header.contains("Secure"));
    }

    #[test]
    fn written_value_overrides_request_value() {
        let mut ctx = RequestContext::from_cookie_header("theme=light");
        ctx.write_cookie("theme", "dark", &site_options()).unwrap();

        assert_eq!(ctx.read_cookies()["theme"], "dark");
        assert_eq!(ctx.read_cookies().len(), 1);
    }

    #[test]
    fn set_cookie_header_round_trips_reserved_characters() {
        let mut ctx = RequestContext::new();
        ctx.write_cookie("q", "a b;c", &CookieOptions::default()).unwrap();

        let header = &headers_as_strings(&ctx)[0];
        assert!(!header.contains("b;c"));

        let echoed = Cookie::parse_encoded(header.clone()).unwrap();
        assert_eq!(echoed.value(), "a b;c");
    }

    #[test]
    fn deleting_a_request_cookie_emits_removal() {
        let mut ctx = RequestContext::from_cookie_header("theme=dark");
        ctx.delete_cookie("theme", &site_options()).unwrap();

        assert!(ctx.read_cookies().get("theme").is_none());

        let headers = headers_as_strings(&ctx);
        assert_eq!(headers.len(), 1);
        let removal = Cookie::parse_encoded(headers[0].clone()).unwrap();
        assert_eq!(removal.name(), "theme");
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
        assert_eq!(removal.domain(), Some("example.com"));
        assert_eq!(removal.path(), Some("/"));
    }

    #[test]
    fn deleting_a_cookie_written_in_this_request_drops_it() {
        let mut ctx = RequestContext::new();
        ctx.write_cookie("tmp", "1", &site_options()).unwrap();
        ctx.delete_cookie("tmp", &site_options()).unwrap();

        assert!(ctx.read_cookies().is_empty());
        assert!(ctx.set_cookie_headers().unwrap().is_empty());
    }

    #[test]
    fn deleting_an_absent_cookie_is_not_an_error() {
        let mut ctx = RequestContext::new();
        assert!(ctx.delete_cookie("missing", &CookieOptions::default()).is_ok());
        assert!(ctx.read_cookies().is_empty());
    }

    #[test]
    fn invalid_names_propagate() {
        let mut ctx = RequestContext::new();
        let err = ctx.write_cookie("bad name", "v", &CookieOptions::default()).unwrap_err();
        assert!(matches!(err, CookieError::InvalidName(ref n) if n == "bad name"));
        assert!(ctx.read_cookies().is_empty());
    }

    #[test]
    fn response_receives_set_cookie_headers() {
        let mut ctx = RequestContext::from_cookie_header("old=1");
        ctx.write_cookie("new", "2", &CookieOptions::default()).unwrap();
        ctx.delete_cookie("old", &CookieOptions::default()).unwrap();

        let mut response = Response::new(());
        ctx.apply_to_response(&mut response).unwrap();

        assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
    }
}
