//! Cookie-backed key/value storage.
//!
//! [`CookieStorage`] turns the cookies of one request (server side, through a
//! [`RequestContext`]) or one page (client side, through a [`DocumentCookieJar`])
//! into a `get_item` / `set_item` / `remove_item` / `clear` store.

pub mod config;
pub mod cookies;
pub mod errors;
pub mod storage;

pub use config::{ConfigError, StorageConfig, StorageConfigBuilder};
pub use cookies::{CookieError, CookieJar, CookieJarHandle, CookieOptions, DocumentCookieJar, RequestContext};
pub use errors::StorageError;
pub use storage::{decode_cookie_value, encode_cookie_value, CookieStorage, StorageArea};
