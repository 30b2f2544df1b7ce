//! Link normalization for model-generated HTML.
//!
//! Language models produce HTML that cannot be trusted to be well formed:
//! smart quotes around attribute values, schemeless or single-slash URLs,
//! markdown links, unquoted attributes, zero-width characters. This crate
//! rewrites such fragments into safe, absolute, correctly quoted anchors that
//! can be published on a static site and sent by email.
//!
//! Every operation is infallible and idempotent: a fragment that cannot be
//! repaired degrades link by link instead of being rejected, and running a
//! rewrite twice gives the same output as running it once.
//!
//! # Example
//!
//! ```rust
//! use link_rewrite::{normalize_href, rewrite_links};
//!
//! assert_eq!(normalize_href("https:/workday.com/ai."), "https://workday.com/ai");
//!
//! let html = rewrite_links(r#"<p><a href = "workday.com/resources">Resource</a></p>"#);
//! assert!(html.contains(r#"href="https://workday.com/resources""#));
//! assert!(html.contains(r#"rel="noopener noreferrer""#));
//! ```

pub mod autolink;
pub mod href;
pub mod rewrite;

pub use autolink::autolink;
pub use href::{is_web_href, normalize_href, PLACEHOLDER_HREF};
pub use rewrite::{has_anchor, rewrite_anchor_tags, rewrite_links, LinkRewriter};

/// Escape a value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Escape text content.
pub fn escape_text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute_round_trips_through_decode() {
        let value = "https://x.com/?a=1&b=\"2\"";
        let escaped = escape_attribute(value);
        assert!(!escaped.contains('"'));
        assert_eq!(href::decode_and_clean(&escaped), value);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Risks & <Mitigations>"), "Risks &amp; &lt;Mitigations&gt;");
    }
}
