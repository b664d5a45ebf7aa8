use cookie_storage::{CookieStorage, RequestContext, StorageConfig, StorageError};
use http::header::{COOKIE, SET_COOKIE};
use http::{Request, Response};
use std::sync::{Arc, RwLock};

fn main() -> Result<(), StorageError> {
    env_logger::init();

    // Pretend a browser sent us two cookies.
    let request = Request::builder()
        .uri("https://example.com/settings")
        .header(COOKIE, "theme=light; visits=3")
        .body(())
        .expect("static request is valid");

    // One context per request. The storage only holds a handle to it.
    let ctx = Arc::new(RwLock::new(RequestContext::from_request(&request)));

    let config = StorageConfig::builder()
        .domain("example.com")
        .expires(30)
        .build()?;
    let storage = CookieStorage::new(ctx.clone(), config);

    log::info!("theme before: {:?}", storage.get_item("theme")?);
    log::info!("theme after: {:?}", storage.set_item("theme", "dark mode/high contrast")?);
    log::info!("visits removed: {:?}", storage.remove_item("visits")?);
    log::info!("keys left: {:?}", storage.keys()?);

    let mut response = Response::new(());
    ctx.read()
        .map_err(|_| StorageError::ContextPoisoned)?
        .apply_to_response(&mut response)?;

    for value in response.headers().get_all(SET_COOKIE) {
        println!("Set-Cookie: {}", value.to_str().unwrap_or("<opaque>"));
    }

    Ok(())
}
