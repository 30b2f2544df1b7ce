//! Conversion of markdown, angle-bracket and bare URLs into anchors.
//!
//! Only text between tags is touched. Three substitutions run over each text
//! segment in a fixed order (markdown, angle-bracket, bare URL); anchors
//! produced by an earlier substitution are skipped by the later ones so a
//! URL is never wrapped twice.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::warn;

use crate::escape_attribute;
use crate::href::{normalize_href, strip_trailing_punctuation};

lazy_static! {
    // Comments and real tags. `<https://...>` is not a tag: the name must be
    // followed by whitespace, '/' or '>'.
    static ref TAG: Regex =
        Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][A-Za-z0-9-]*(?:\s[^>]*)?/?>").unwrap();

    static ref ANCHOR_OPEN: Regex = Regex::new(r"(?i)^<a[\s>]").unwrap();
    static ref ANCHOR_CLOSE: Regex = Regex::new(r"(?i)^</a\s*>").unwrap();

    // A complete anchor element produced inside the current segment.
    static ref LINKED: Regex = Regex::new(r"(?is)<a\s[^>]*>.*?</a>").unwrap();

    static ref MARKDOWN_LINK: Regex =
        Regex::new(r"\[([^\[\]]+)\]\(\s*([^()\s]+)\s*\)").unwrap();

    static ref ANGLE_LINK: Regex =
        Regex::new(r"(?i)(?:<|&lt;)((?:https?://|www\.)[^\s<>]+?)(?:>|&gt;)").unwrap();

    static ref BARE_URL: Regex = Regex::new(r#"(?i)\bhttps?://[^\s<>"]+"#).unwrap();

    static ref OPEN_COUNT: Regex = Regex::new(r"(?i)<a\b").unwrap();
    static ref CLOSE_COUNT: Regex = Regex::new(r"(?i)</a\s*>").unwrap();
}

/// Turn non-anchor link syntaxes into anchors.
///
/// Fails open: if the output does not have one closing tag per generated
/// anchor, the input is returned unmodified.
///
/// ```
/// use link_rewrite::autolink;
///
/// assert_eq!(
///     autolink("<p>See [the roadmap](https://workday.com/ai).</p>"),
///     r#"<p>See <a href="https://workday.com/ai">the roadmap</a>.</p>"#
/// );
/// ```
pub fn autolink(html: &str) -> String {
    let linked = link_segments(html);

    let opened = OPEN_COUNT
        .find_iter(&linked)
        .count()
        .saturating_sub(OPEN_COUNT.find_iter(html).count());
    let closed = CLOSE_COUNT
        .find_iter(&linked)
        .count()
        .saturating_sub(CLOSE_COUNT.find_iter(html).count());
    if opened != closed {
        warn!(opened, closed, "Autolinking produced unbalanced anchors; keeping original");
        return html.to_string();
    }
    linked
}

fn link_segments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut inside_anchor = false;
    let mut last = 0;

    for tag in TAG.find_iter(html) {
        let text = &html[last..tag.start()];
        if inside_anchor {
            out.push_str(text);
        } else {
            out.push_str(&link_text(text));
        }

        let tag_text = tag.as_str();
        if ANCHOR_OPEN.is_match(tag_text) {
            inside_anchor = true;
        } else if ANCHOR_CLOSE.is_match(tag_text) {
            inside_anchor = false;
        }
        out.push_str(tag_text);
        last = tag.end();
    }

    let rest = &html[last..];
    if inside_anchor {
        out.push_str(rest);
    } else {
        out.push_str(&link_text(rest));
    }
    out
}

fn link_text(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let text = replace_outside_links(text, &MARKDOWN_LINK, markdown_anchor);
    let text = replace_outside_links(&text, &ANGLE_LINK, angle_anchor);
    replace_outside_links(&text, &BARE_URL, bare_anchor)
}

fn replace_outside_links<F>(text: &str, pattern: &Regex, replace: F) -> String
where
    F: Fn(&Captures<'_>) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for linked in LINKED.find_iter(text) {
        let gap = &text[last..linked.start()];
        out.push_str(&pattern.replace_all(gap, |caps: &Captures<'_>| replace(caps)));
        out.push_str(linked.as_str());
        last = linked.end();
    }
    out.push_str(&pattern.replace_all(&text[last..], |caps: &Captures<'_>| replace(caps)));
    out
}

fn anchor(url: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape_attribute(&normalize_href(url)),
        label
    )
}

fn markdown_anchor(caps: &Captures<'_>) -> String {
    anchor(&caps[2], &caps[1])
}

fn angle_anchor(caps: &Captures<'_>) -> String {
    anchor(&caps[1], &caps[1])
}

fn bare_anchor(caps: &Captures<'_>) -> String {
    let matched = &caps[0];
    let url = strip_trailing_punctuation(matched);
    if url.is_empty() {
        return matched.to_string();
    }
    format!("{}{}", anchor(url, url), &matched[url.len()..])
}
