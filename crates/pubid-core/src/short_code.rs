//! Short code derivation
//!
//! The same derivation renders short links and matches them on the way
//! back in. Nothing else may compute a short code.

use crate::model::published_key;

/// Number of characters in a short code
pub const SHORT_CODE_LEN: usize = 8;

/// Derive the public short code for a canonical key.
///
/// Strips the draft marker, keeps the last `.`-delimited segment, lowercases
/// it and truncates to [`SHORT_CODE_LEN`] characters.
///
/// ```
/// use pubid_core::short_code;
/// assert_eq!(short_code("event.abc123def456"), "abc123de");
/// assert_eq!(short_code("drafts.event.XYZ"), "xyz");
/// ```
pub fn short_code(key: &str) -> String {
    let clean = published_key(key);
    let unique = clean.rsplit('.').next().unwrap_or(clean);
    unique
        .to_lowercase()
        .chars()
        .take(SHORT_CODE_LEN)
        .collect()
}

/// Build the user-facing short URL `{base_url}/{route}/{short_code}`.
///
/// ```
/// use pubid_core::short_link;
/// assert_eq!(
///     short_link("https://example.org/", "events", "event.abc123def456"),
///     "https://example.org/events/abc123de"
/// );
/// ```
pub fn short_link(base_url: &str, route: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        route.trim_matches('/'),
        short_code(key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_takes_last_segment() {
        assert_eq!(short_code("event.abc12345"), "abc12345");
        assert_eq!(short_code("a.b.c.deadbeefcafe"), "deadbeef");
    }

    #[test]
    fn test_short_code_without_dots_uses_whole_key() {
        assert_eq!(short_code("AbC"), "abc");
    }

    #[test]
    fn test_short_code_of_uuid_key() {
        assert_eq!(
            short_code("event.c497b2fe-f21b-4ab7-ac81-4cf5febfea50"),
            "c497b2fe"
        );
    }

    #[test]
    fn test_draft_and_published_share_code() {
        assert_eq!(
            short_code("drafts.event.xyz98765"),
            short_code("event.xyz98765")
        );
    }

    #[test]
    fn test_trailing_dot_yields_empty_code() {
        assert_eq!(short_code("event."), "");
    }

    #[test]
    fn test_short_link_normalises_slashes() {
        assert_eq!(
            short_link("http://localhost:3000", "/services/", "service.Q1w2E3r4T5"),
            "http://localhost:3000/services/q1w2e3r4"
        );
    }
}
