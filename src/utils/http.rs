//! HTTP status and header helpers

use super::time::format_rfc1123;
use chrono::{TimeZone, Utc};
use ::http::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

pub const HEADER_X_FORWARDED_PROTO: &str = "X-Forwarded-Proto";
pub const HEADER_EXPIRES: &str = "Expires";
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
pub const HEADER_PRAGMA: &str = "Pragma";

const NO_CACHE_CONTROL: &str = "no-cache, private, max-age=0";
const NO_CACHE_PRAGMA: &str = "no-cache";

pub fn is_status_code_2xx(code: u16) -> bool {
    (200..300).contains(&code)
}

/// Set headers telling clients and proxies not to cache the response.
///
/// `Expires` is set to the Unix epoch so the response is already stale.
pub fn write_no_cache_headers(headers: &mut HeaderMap) {
    let expires = Utc
        .timestamp_opt(0, 0)
        .single()
        .and_then(|epoch| HeaderValue::from_str(&format_rfc1123(&epoch)).ok());
    if let Some(expires) = expires {
        headers.insert(EXPIRES, expires);
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL));
    headers.insert(PRAGMA, HeaderValue::from_static(NO_CACHE_PRAGMA));
}
