//! Request path normalization
//!
//! Every request path is reduced to a single dispatch key before matching:
//! percent-decoded, query string removed, surrounding slashes trimmed and a
//! single leading `/` restored. `/foo/`, `foo` and `/foo?x=1` all become
//! `/foo`; an empty path becomes `/`.

use std::borrow::Cow;

/// Checks whether a path is already a dispatch key
///
/// **Pure function**: no decoding is attempted.
///
/// # Rules
///
/// - Must start with exactly one `/`
/// - Must not end with `/` (except root `/`)
/// - Must not contain `%` or `?`
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::path::is_normalized;
///
/// assert!(is_normalized("/"));
/// assert!(is_normalized("/users/42"));
///
/// assert!(!is_normalized(""));
/// assert!(!is_normalized("users"));
/// assert!(!is_normalized("/users/"));
/// assert!(!is_normalized("//users"));
/// assert!(!is_normalized("/users?page=2"));
/// assert!(!is_normalized("/caf%C3%A9"));
/// ```
pub fn is_normalized(path: &str) -> bool {
    if path == "/" {
        return true;
    }

    path.starts_with('/')
        && !path.starts_with("//")
        && !path.ends_with('/')
        && !path.contains(|c: char| c == '%' || c == '?')
}

/// Normalizes a raw request target into a dispatch key
///
/// Returns `Cow::Borrowed` when the input is already normalized.
///
/// Decoding happens before the query string is cut, so an encoded `%3F`
/// also terminates the path. Invalid UTF-8 after decoding is replaced with
/// U+FFFD rather than rejected. Interior `//` sequences are kept as-is.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::path::normalize_request_path;
///
/// assert_eq!(normalize_request_path("/foo/"), "/foo");
/// assert_eq!(normalize_request_path("foo"), "/foo");
/// assert_eq!(normalize_request_path("/foo?x=1"), "/foo");
/// assert_eq!(normalize_request_path("/caf%C3%A9/"), "/café");
/// assert_eq!(normalize_request_path(""), "/");
/// ```
pub fn normalize_request_path(raw: &str) -> Cow<'_, str> {
    if is_normalized(raw) {
        return Cow::Borrowed(raw);
    }

    let decoded = percent_decode(raw);
    let without_query = match decoded.find('?') {
        Some(idx) => &decoded[..idx],
        None => &decoded[..],
    };

    let trimmed = without_query.trim_matches('/');
    Cow::Owned(format!("/{trimmed}"))
}

/// Percent-decodes a path, allocating only when it contains escapes
fn percent_decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }

    match urlencoding::decode_binary(raw.as_bytes()) {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}
