//! Key-to-namespace dispatch shared by validators and selectors.
//!
//! Keys look like `/<namespace>/<id>`. Splitting on `/` gives
//! `["", namespace, id...]`; anything with fewer than three segments has no
//! namespace.

use std::borrow::Cow;

/// Separator between key segments.
pub const SEPARATOR: u8 = b'/';

/// Extract the namespace of `key`, or `None` for unnamespaced keys.
///
/// The namespace is the second segment, whatever the first one holds.
/// Non-UTF-8 bytes are replaced, so such a namespace never matches a
/// registered name.
pub fn namespace(key: &[u8]) -> Option<Cow<'_, str>> {
    let mut parts = key.split(|b| *b == SEPARATOR);
    parts.next()?;
    let ns = parts.next()?;
    parts.next()?;
    Some(String::from_utf8_lossy(ns))
}

/// Render a key for diagnostics.
pub(crate) fn display(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}
