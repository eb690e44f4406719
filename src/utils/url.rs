//! URL helpers

use super::paths::clean_path;
use once_cell::sync::Lazy;
use ::url::{ParseError, Url};

const PASSWORD_MASK: &str = "***";

/// Base used to resolve path-only inputs such as `/products/books`.
static RELATIVE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost/").expect("valid base url"));

/// Replace the password component of a URL with `***`.
///
/// Text that does not parse as a URL is returned unchanged.
pub fn mask_password(text: &str) -> String {
    let Ok(url) = Url::parse(text) else {
        return text.to_string();
    };

    let serialized = url.to_string();
    match url.password() {
        Some(password) => serialized.replacen(&format!("{password}@"), &format!("{PASSWORD_MASK}@"), 1),
        None => serialized,
    }
}

/// Cleaned path component of `site_url`, or `/` when there is none.
pub fn get_path_from_url(site_url: &str) -> String {
    if site_url.is_empty() {
        return "/".to_string();
    }

    let parsed = match Url::parse(site_url) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => match RELATIVE_BASE.join(site_url) {
            Ok(url) => url,
            Err(_) => return "/".to_string(),
        },
        Err(_) => return "/".to_string(),
    };

    if parsed.path().is_empty() {
        return "/".to_string();
    }
    clean_path(parsed.path())
}
