//! Rewriting of every anchor tag in an HTML fragment.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::autolink::autolink;
use crate::escape_attribute;
use crate::href::{is_web_href, normalize_href};

lazy_static! {
    // Opening anchor tag. A quoted value may contain '>' but may not run
    // across another tag; an unterminated quote falls back to [^>]. A single
    // quote only opens a value right after '=', so apostrophes in text don't.
    static ref ANCHOR_OPEN_TAG: Regex =
        Regex::new(r#"(?i)(<a)\b((?:"[^"<]*"|=\s*'[^'<]*'|[^>])*)>"#).unwrap();

    // href attribute inside the tag body: double-quoted, single-quoted,
    // opened-but-unterminated, or bare.
    static ref HREF_ATTR: Regex = Regex::new(
        r#"(?i)(^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)'|["']([^\s>]*)|([^\s"'>][^\s>]*))"#
    )
    .unwrap();

    static ref TARGET_ATTR: Regex = Regex::new(r"(?i)(^|\s)target\s*=").unwrap();
    static ref REL_ATTR: Regex = Regex::new(r"(?i)(^|\s)rel\s*=").unwrap();
    static ref ANY_ANCHOR: Regex = Regex::new(r"(?i)<a\b").unwrap();
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
}

/// True when the fragment contains at least one anchor tag outside
/// comments.
pub fn has_anchor(html: &str) -> bool {
    ANY_ANCHOR.is_match(&COMMENT.replace_all(html, ""))
}

/// Rewrite a fragment so every anchor carries a normalized, double-quoted
/// `href`, and external links open in a new tab without an opener.
///
/// Fragments without any anchor are first autolinked (markdown, angle-bracket
/// and bare URLs), so well-formed markup is never double-wrapped.
///
/// ```
/// use link_rewrite::rewrite_links;
///
/// assert_eq!(
///     rewrite_links("<a href=//example.com/page>Link</a>"),
///     r#"<a href="https://example.com/page" target="_blank" rel="noopener noreferrer">Link</a>"#
/// );
/// ```
pub fn rewrite_links(html: &str) -> String {
    if has_anchor(html) {
        rewrite_anchor_tags(html)
    } else {
        rewrite_anchor_tags(&autolink(html))
    }
}

/// Rewrite existing anchor tags only. Text outside the tags is untouched.
pub fn rewrite_anchor_tags(html: &str) -> String {
    ANCHOR_OPEN_TAG
        .replace_all(html, |caps: &Captures<'_>| rewrite_open_tag(caps))
        .into_owned()
}

fn rewrite_open_tag(caps: &Captures<'_>) -> String {
    let opener = &caps[1];
    let body = &caps[2];

    let Some(attr) = HREF_ATTR.captures(body) else {
        return caps[0].to_string();
    };
    let Some(whole) = attr.get(0) else {
        return caps[0].to_string();
    };
    let raw_value = (2..=5)
        .find_map(|group| attr.get(group))
        .map_or("", |m| m.as_str());

    let href = normalize_href(raw_value);
    let prefix = &body[..whole.start()];
    // Only the first href counts; repeats are dropped.
    let rest = HREF_ATTR.replace_all(&body[whole.end()..], "");

    // Self-closing tags keep their slash last.
    let (suffix, tail) = match rest.trim_end().strip_suffix('/') {
        Some(attrs) => (attrs, &rest[attrs.len()..]),
        None => (&*rest, ""),
    };

    let mut extra = String::new();
    if is_web_href(&href) {
        if !TARGET_ATTR.is_match(prefix) && !TARGET_ATTR.is_match(suffix) {
            extra.push_str(r#" target="_blank""#);
        }
        if !REL_ATTR.is_match(prefix) && !REL_ATTR.is_match(suffix) {
            extra.push_str(r#" rel="noopener noreferrer""#);
        }
    }

    format!(
        "{opener}{prefix}{lead}href=\"{value}\"{suffix}{extra}{tail}>",
        lead = &attr[1],
        value = escape_attribute(&href),
    )
}

/// Link rewriting with the operator's "preserve original markup" switch.
///
/// When `preserve_markup` is set the fragment is returned unchanged; the
/// call is still made so both modes go through the same entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkRewriter {
    pub preserve_markup: bool,
}

impl LinkRewriter {
    pub fn new(preserve_markup: bool) -> Self {
        Self { preserve_markup }
    }

    pub fn rewrite(&self, html: &str) -> String {
        if self.preserve_markup {
            tracing::debug!("Preserving model markup; link rewriting bypassed");
            return html.to_string();
        }
        rewrite_links(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_schemeless_href() {
        assert_eq!(
            rewrite_links("<a href=//example.com/page>Link</a>"),
            r#"<a href="https://example.com/page" target="_blank" rel="noopener noreferrer">Link</a>"#
        );
    }

    #[test]
    fn test_whitespace_around_equals() {
        let rewritten = rewrite_links(r#"<p><a href = "workday.com/resources">Resource</a></p>"#);
        assert!(rewritten.contains(r#"href="https://workday.com/resources""#));
        assert!(rewritten.contains(r#"target="_blank""#));
        assert!(rewritten.starts_with("<p><a "));
        assert!(rewritten.ends_with(">Resource</a></p>"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let rewritten =
            rewrite_links(r#"<a class="src" href='https://x.com/a' data-id="7">X</a>"#);
        assert_eq!(
            rewritten,
            r#"<a class="src" href="https://x.com/a" data-id="7" target="_blank" rel="noopener noreferrer">X</a>"#
        );
    }

    #[test]
    fn test_existing_target_and_rel_kept() {
        let html = r#"<a target="_self" rel="nofollow" href="https://x.com/a">X</a>"#;
        assert_eq!(rewrite_links(html), html);
    }

    #[test]
    fn test_internal_links_get_no_target() {
        assert_eq!(
            rewrite_links(r##"<a href="#risks">Risks</a> <a href="mailto:a@b.com">Mail</a>"##),
            r##"<a href="#risks">Risks</a> <a href="mailto:a@b.com">Mail</a>"##
        );
    }

    #[test]
    fn test_smart_quoted_href() {
        let rewritten = rewrite_links("<a href=\u{201C}https://x.com/a\u{201D}>X</a>");
        assert_eq!(
            rewritten,
            r#"<a href="https://x.com/a" target="_blank" rel="noopener noreferrer">X</a>"#
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let rewritten = rewrite_links(r#"<a href="https://x.com/a>X</a>"#);
        assert_eq!(
            rewritten,
            r#"<a href="https://x.com/a" target="_blank" rel="noopener noreferrer">X</a>"#
        );
    }

    #[test]
    fn test_query_ampersand_escaped() {
        let rewritten = rewrite_links(r#"<a href="https://x.com/?a=1&b=2">X</a>"#);
        assert!(rewritten.contains(r#"href="https://x.com/?a=1&amp;b=2""#));
        assert_eq!(rewrite_links(&rewritten), rewritten);
    }

    #[test]
    fn test_anchor_without_href_untouched() {
        let html = r#"<a name="top"></a><p>Body</p>"#;
        assert_eq!(rewrite_links(html), html);
    }

    #[test]
    fn test_abbr_is_not_an_anchor() {
        let html = "<abbr>HCM</abbr> <a href=workday.com>W</a>";
        let rewritten = rewrite_links(html);
        assert!(rewritten.starts_with("<abbr>HCM</abbr> <a href=\"https://workday.com/\""));
    }

    #[test]
    fn test_data_href_not_confused_with_href() {
        let rewritten = rewrite_links(r#"<a data-href="x" href="/about">About</a>"#);
        assert_eq!(rewritten, r#"<a data-href="x" href="/about">About</a>"#);
    }

    #[test]
    fn test_self_closing_anchor() {
        let rewritten = rewrite_links(r#"<a href="https://x.com/"/>"#);
        assert_eq!(
            rewritten,
            r#"<a href="https://x.com/" target="_blank" rel="noopener noreferrer"/>"#
        );
        assert_eq!(rewrite_links(&rewritten), rewritten);
    }

    #[test]
    fn test_single_quoted_value_with_gt() {
        let rewritten = rewrite_links(r#"<a title='a > b' href="workday.com/x">X</a>"#);
        assert_eq!(
            rewritten,
            r#"<a title='a > b' href="https://workday.com/x" target="_blank" rel="noopener noreferrer">X</a>"#
        );
        assert_eq!(rewrite_links(&rewritten), rewritten);

        let apostrophes = "<a href=/about>O'Brien's</a> it's <a href='/x'>X</a>";
        assert_eq!(
            rewrite_links(apostrophes),
            r#"<a href="/about">O'Brien's</a> it's <a href="/x">X</a>"#
        );
    }

    #[test]
    fn test_repeated_href_dropped() {
        let rewritten =
            rewrite_links(r#"<a href="workday.com/a" class="c" href="workday.com/b">A</a>"#);
        assert_eq!(
            rewritten,
            r#"<a href="https://workday.com/a" class="c" target="_blank" rel="noopener noreferrer">A</a>"#
        );
        assert_eq!(rewrite_links(&rewritten), rewritten);
    }

    #[test]
    fn test_commented_anchor_is_not_an_anchor() {
        assert!(!has_anchor("<!-- <a --> see https://x.com/a"));
        assert!(has_anchor("<!-- note --> <a href=\"/x\">X</a>"));
        assert_eq!(
            rewrite_links("<!-- <a --> see https://x.com/a"),
            r#"<!-- <a --> see <a href="https://x.com/a" target="_blank" rel="noopener noreferrer">https://x.com/a</a>"#
        );
    }

    #[test]
    fn test_idempotent_on_messy_fragment() {
        let html = concat!(
            "<h2>Brief</h2><ul>",
            "<li><a href=\u{201C}workday.com/ai\u{201D}>AI</a></li>",
            "<li><a HREF = 'https: //newsroom.workday.com/x y'>News</a>.</li>",
            "<li><a href=/careers>Careers</a></li>",
            "<li><a href=\"javascript:void(0)\">Bad</a></li>",
            "</ul>"
        );
        let once = rewrite_links(html);
        assert_eq!(rewrite_links(&once), once);
        assert!(!once.contains('\u{201C}'));
        assert!(once.contains(r#"href="/careers""#));
        assert!(once.contains(r##"href="#""##));
    }

    #[test]
    fn test_preserve_markup_bypasses_rewrite() {
        let html = "<a href=workday.com>W</a>";
        assert_eq!(LinkRewriter::new(true).rewrite(html), html);
        assert_ne!(LinkRewriter::new(false).rewrite(html), html);
    }

    #[test]
    fn test_text_outside_anchors_untouched() {
        let html = "<p>Read \u{201C}this\u{201D} & that</p>";
        assert_eq!(rewrite_anchor_tags(html), html);
    }
}
