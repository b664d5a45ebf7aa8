//! Cookies: the [`CookieJar`] boundary and its server and client backends.

mod cookie_jar;
mod cookies;
mod document_jar;
mod request_context;

pub use cookies::Cookie;
pub use cookies::CookieError;
pub use cookies::CookieJarHandle;

pub use cookie_jar::CookieJar;
pub use cookie_jar::CookieOptions;
pub use document_jar::DocumentCookieJar;
pub use request_context::RequestContext;
