//! Cookie-backed key/value storage.
//!
//! This module exposes cookies through the DOM `Storage` shape
//! (`get_item` / `set_item` / `remove_item` / `clear`) so calling code can treat
//! them as a small persistent key/value store.
//!
//! # Concepts
//!
//! - [`StorageArea`]: object-safe key/value interface.
//! - [`CookieStorage`]: a [`StorageArea`] bound to one cookie context
//!   ([`CookieJarHandle`](crate::cookies::CookieJarHandle)) and a fixed
//!   [`StorageConfig`](crate::config::StorageConfig).
//! - [`encode_cookie_value`]: the value encoding applied on every write.
//!
//! # Example: per-request storage
//!
//! ```rust
//! use std::sync::{Arc, RwLock};
//! use cookie_storage::config::StorageConfig;
//! use cookie_storage::cookies::RequestContext;
//! use cookie_storage::storage::CookieStorage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Arc::new(RwLock::new(RequestContext::from_cookie_header("theme=light")));
//! let storage = CookieStorage::new(ctx.clone(), StorageConfig::builder().domain("example.com").build()?);
//!
//! assert_eq!(storage.get_item("theme")?.as_deref(), Some("light"));
//! storage.set_item("theme", "dark")?;
//!
//! let mut response = http::Response::new(());
//! ctx.read().unwrap().apply_to_response(&mut response)?;
//! assert_eq!(response.headers().get_all(http::header::SET_COOKIE).iter().count(), 1);
//! # Ok(()) }
//! ```

/// Storage area trait.
pub mod area;
/// Cookie-backed storage area.
pub mod cookie_storage;
/// Cookie value encoding.
pub mod encoding;

pub use area::StorageArea;
pub use cookie_storage::CookieStorage;
pub use encoding::{decode_cookie_value, encode_cookie_value};
