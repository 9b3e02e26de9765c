//! Encoding helpers for paths and query strings.

use crate::error::{Error, Result};

/// Percent-encode a value as a single RFC3986 path segment.
///
/// Everything outside the unreserved set is encoded, including `/`, so a
/// document id like `a/b` lands in the URL as `a%2Fb`.
pub fn encode_path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Validate that a required path parameter is present and non-empty.
///
/// Returns the value back so call sites can validate and bind in one step.
pub fn require_path_param<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::invalid_input(name));
    }
    Ok(value)
}

/// Join a list of strings into a single comma-separated query value.
///
/// The comma itself is percent-encoded later, when the query string is
/// assembled (`states=running,pending` becomes `states=running%2Cpending`).
pub fn join_csv<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
