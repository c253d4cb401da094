//! Substring-search cookie reader
//!
//! Kept for compatibility with callers that relied on its exact output.
//! It finds `name` anywhere in the string, so a name that is part of another
//! cookie's name or value yields the wrong slice, and a miss returns
//! [`MISSING_COOKIE_PLACEHOLDER`] instead of signalling absence. Prefer
//! [`super::get_cookie`].

/// Returned when `name` does not occur in the cookie string at all
pub const MISSING_COOKIE_PLACEHOLDER: &str = "World !";

/// Slice the characters following the first occurrence of `name` and its
/// separator, up to the next `;` or end of string.
pub fn get_cookie(raw: &str, name: &str) -> String {
    let Some(index) = raw.find(name) else {
        return MISSING_COOKIE_PLACEHOLDER.to_string();
    };

    let end = raw[index..]
        .find(';')
        .map(|offset| index + offset)
        .unwrap_or(raw.len());
    // Skip the character following the name (normally `=`), whatever its width.
    let after_name = index + name.len();
    let start = raw[after_name..]
        .chars()
        .next()
        .map_or(after_name, |c| after_name + c.len_utf8());

    if start >= end {
        return String::new();
    }
    raw.get(start..end).unwrap_or_default().to_string()
}
