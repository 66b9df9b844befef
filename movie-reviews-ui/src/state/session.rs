//! Browser session storage
//!
//! `window.localStorage` as a [`SessionStorage`] backend.

use movie_reviews::session::{SessionError, SessionResult, SessionStorage};
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on every access
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> SessionResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| SessionError::Unavailable("local storage disabled".to_string()))
    }
}

fn js_error(value: JsValue) -> SessionError {
    SessionError::Unavailable(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}
