//! Validated value types.

mod base_url;

pub use base_url::BaseUrl;

/// Form-url-encode a query value (spaces become `+`).
pub(crate) fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encode a value for use as a single path segment.
///
/// A `+` in a path is a literal plus, so spaces are written as `%20`. A literal
/// `+` in the input has already been escaped to `%2B`.
pub(crate) fn encode_segment(value: &str) -> String {
    encode(value).replace('+', "%20")
}
