//! Decoding of the catalog's `next`/`prev` pagination links.
//!
//! The service hands out cursors as query-string fragments such as
//! `/dogs/search?size=24&from=24&sort=breed:asc`. Only the `from` value is
//! meaningful; it is resent verbatim on the next request. A bare token with
//! no query-string syntax around it is accepted as-is.

use once_cell::sync::Lazy;
use regex::Regex;

use pawfinder_core::search::Cursor;

static FROM_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[?&#;])from=([^&#]*)").expect("from= pattern is valid"));

/// Extracts the opaque token from a `next`/`prev` link.
///
/// Returns `None` for empty input, an empty `from=` value, or a fragment
/// that carries query syntax but no `from` key.
pub(crate) fn decode_cursor(raw: &str) -> Option<Cursor> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(captures) = FROM_PARAM.captures(raw) {
        let token = captures.get(1)?.as_str();
        return (!token.is_empty()).then(|| Cursor::new(token));
    }

    let is_bare_token = !raw
        .chars()
        .any(|c| matches!(c, '?' | '&' | '=' | '#' | '/') || c.is_whitespace());
    is_bare_token.then(|| Cursor::new(raw))
}
