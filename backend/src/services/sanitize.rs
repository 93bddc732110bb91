//! Text sanitisation for user input, upstream model output and error text.
//!
//! Pattern matching is case-insensitive; everything else passes through
//! untouched, including non-ASCII text.

use regex::Regex;
use std::sync::LazyLock;

/// Location names must be at least this long after sanitising.
pub const MIN_LOCATION_NAME_LEN: usize = 2;
/// Location names may be at most this long after sanitising.
pub const MAX_LOCATION_NAME_LEN: usize = 100;

const GENERIC_ERROR: &str = "A system error occurred. Please try again later.";

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script block pattern"));
static JAVASCRIPT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("javascript url pattern"));
// ASCII word characters only, so `on` followed by accented text is kept.
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on[[:word:]]+=").expect("event handler pattern"));
static ANGLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]").expect("angle bracket pattern"));
static SENSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)api[_\s]?key|token|password|secret|auth").expect("sensitive pattern")
});

/// Strip script blocks, `javascript:` URLs, inline `on*=` handlers and angle
/// brackets, then trim.
pub fn sanitize_text(text: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(text, "");
    let text = JAVASCRIPT_URL.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    ANGLE_BRACKETS.replace_all(&text, "").trim().to_string()
}

/// Validate a free-text location name.
pub fn validate_location_name(name: &str) -> Result<String, String> {
    if name.is_empty() {
        return Err("Location name is required.".to_string());
    }
    let sanitized = sanitize_text(name);
    let len = sanitized.chars().count();
    if len < MIN_LOCATION_NAME_LEN {
        return Err(format!(
            "Location name must be at least {} characters long.",
            MIN_LOCATION_NAME_LEN
        ));
    }
    if len > MAX_LOCATION_NAME_LEN {
        return Err(format!(
            "Location name must be less than {} characters.",
            MAX_LOCATION_NAME_LEN
        ));
    }
    Ok(sanitized)
}

/// Message safe to show a client for an internal failure.
///
/// Anything that mentions credentials or auth is replaced by a generic
/// message.
pub fn public_error_message(message: &str) -> String {
    if SENSITIVE.is_match(message) {
        return GENERIC_ERROR.to_string();
    }
    let cleaned = sanitize_text(message);
    if cleaned.is_empty() {
        "An unexpected error occurred. Please try again later.".to_string()
    } else {
        cleaned
    }
}
