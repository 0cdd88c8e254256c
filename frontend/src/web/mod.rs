//! Native web API wrappers.
//!
//! Lightweight wrappers around the browser APIs the console needs, instead
//! of the gloo-* crates, to keep the WASM binary small.

pub mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{HttpClient, HttpMethod};
pub use storage::{BrowserTokenStore, LocalStorage};

/// Current wall-clock time in epoch milliseconds.
pub fn now_timestamp() -> cvadmin_shared::Timestamp {
    cvadmin_shared::Timestamp::new(js_sys::Date::now() as i64)
}

/// Render a server timestamp string in the browser locale. Unparseable
/// values pass through untouched.
pub fn format_datetime(value: &str) -> String {
    let ms = js_sys::Date::parse(value);
    if ms.is_nan() {
        return value.to_string();
    }
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms));
    String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}
