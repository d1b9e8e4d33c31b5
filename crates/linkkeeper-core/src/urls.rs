//! URL validity and display formatting
//!
//! The http/https check is the primary admission gate for the whole
//! store; the display form is a presentation helper with a precise
//! truncation contract.

use url::Url;

/// Longest display form emitted without truncation.
const DISPLAY_URL_MAX: usize = 48;
/// Characters kept when a display form is truncated.
const DISPLAY_URL_KEEP: usize = 45;

/// Returns true when `value` parses as an absolute URL with the `http`
/// or `https` scheme. Parse failures are "invalid", never propagated.
pub fn is_valid_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Compact human-readable form of a URL
///
/// Host (with port if any), plus the path when it is not just `/`, plus
/// the query string. Forms longer than 48 characters are cut to 45 and a
/// single ellipsis is appended. Unparsable input is returned unchanged.
pub fn format_display_url(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let mut display = String::new();
    if let Some(host) = url.host_str() {
        display.push_str(host);
    }
    if let Some(port) = url.port() {
        display.push(':');
        display.push_str(&port.to_string());
    }
    let path = url.path();
    if !path.is_empty() && path != "/" {
        display.push_str(path);
    }
    if let Some(query) = url.query() {
        display.push('?');
        display.push_str(query);
    }

    if display.chars().count() > DISPLAY_URL_MAX {
        display = display.chars().take(DISPLAY_URL_KEEP).collect();
        display.push('…');
    }
    display
}
