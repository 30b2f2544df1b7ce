//! Normalization of a single `href` attribute value.
//!
//! Every step is a pure function so it can be tested on its own;
//! [`normalize_href`] chains them in order. The result is always safe to
//! embed in a double-quoted attribute once escaped with
//! [`escape_attribute`](crate::escape_attribute).

use std::borrow::Cow;

use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use url::Url;

/// Non-navigable placeholder used when an href carries nothing, or a
/// script-capable scheme.
pub const PLACEHOLDER_HREF: &str = "#";

/// Schemes that are launchable but not web pages. Passed through with
/// minimal escaping.
const PASSTHROUGH_SCHEMES: &[&str] = &["mailto", "tel", "sms"];

/// Schemes that can execute content in the reader's browser or mail client.
const BLOCKED_SCHEMES: &[&str] = &["javascript", "vbscript", "data", "file"];

/// Characters escaped in relative, fragment and non-web values.
///
/// `%` is listed so a stray percent sign becomes `%25`; well-formed `%XX`
/// escapes are skipped before this set is consulted.
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%');

lazy_static! {
    // "https : / / host" and friends, including the well-formed form.
    static ref SPACED_SCHEME: Regex =
        Regex::new(r"(?is)^(https?)\s*:\s*/\s*/\s*(.*)$").unwrap();

    // "https:/host" or "https:host"
    static ref SINGLE_SLASH_SCHEME: Regex =
        Regex::new(r"(?is)^(https?)\s*:\s*/?\s*([^/\s].*)$").unwrap();

    // label.label.tld with optional port and path, no scheme
    static ref BARE_DOMAIN: Regex = Regex::new(
        r"(?is)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,24}(?::\d{1,5})?(?:[/?#].*)?$"
    )
    .unwrap();

    static ref SCHEME: Regex = Regex::new(r"(?s)^([A-Za-z][A-Za-z0-9+.-]*):(.*)$").unwrap();
}

/// Map one raw attribute value, however malformed, to a launchable URL.
///
/// The output starts with `http://`, `https://`, `mailto:`, `tel:`, `sms:`,
/// `#` or `/`, except for values that cannot be resolved at all: those come
/// back percent-encoded verbatim so a reviewer can see what the model wrote.
///
/// ```
/// use link_rewrite::normalize_href;
///
/// assert_eq!(normalize_href("workday.com/resources"), "https://workday.com/resources");
/// assert_eq!(normalize_href("//example.com/page"), "https://example.com/page");
/// assert_eq!(normalize_href("/careers/open roles"), "/careers/open%20roles");
/// ```
pub fn normalize_href(raw: &str) -> String {
    let cleaned = decode_and_clean(raw);
    let unquoted = strip_wrapping_quotes(&cleaned);
    let trimmed = strip_trailing_punctuation(unquoted);
    if trimmed.is_empty() {
        return PLACEHOLDER_HREF.to_string();
    }

    let canonical = canonicalize_scheme(trimmed);
    let completed = complete_bare_domain(&canonical);
    encode_resolved(&completed)
}

/// True when the value opens a web page in a new browsing context.
pub fn is_web_href(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Step 1: decode HTML entities, drop zero-width characters, trim.
pub fn decode_and_clean(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    decoded
        .chars()
        .filter(|c| !is_invisible(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Step 2: strip smart quotes, straight quotes, backticks and wrapping
/// brackets from both ends.
pub fn strip_wrapping_quotes(value: &str) -> &str {
    value
        .trim_start_matches(|c: char| c.is_whitespace() || is_quote(c) || matches!(c, '(' | '[' | '<'))
        .trim_end_matches(|c: char| c.is_whitespace() || is_quote(c) || c == '>')
}

/// Step 3: strip punctuation that trails a URL embedded in a sentence.
///
/// Closing brackets are kept while they balance an opening one inside the
/// value, so `/wiki/Foo_(bar)` survives.
pub fn strip_trailing_punctuation(value: &str) -> &str {
    let mut end = value.len();
    while let Some(last) = value[..end].chars().last() {
        let current = &value[..end];
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' => true,
            ')' => unbalanced(current, '(', ')'),
            ']' => unbalanced(current, '[', ']'),
            '}' => unbalanced(current, '{', '}'),
            c => c.is_whitespace() || is_quote(c) || c == '>',
        };
        if !strip {
            break;
        }
        end -= last.len_utf8();
    }
    &value[..end]
}

/// Step 4: canonicalize the scheme form.
///
/// `//host` and `www.host` gain `https:`; single-slash and spaced-out
/// `http(s)` schemes are repaired; the scheme is lowercased.
pub fn canonicalize_scheme(value: &str) -> Cow<'_, str> {
    if let Some(caps) = SPACED_SCHEME.captures(value) {
        return Cow::Owned(format!("{}://{}", caps[1].to_ascii_lowercase(), &caps[2]));
    }
    if let Some(caps) = SINGLE_SLASH_SCHEME.captures(value) {
        return Cow::Owned(format!("{}://{}", caps[1].to_ascii_lowercase(), &caps[2]));
    }
    if let Some(rest) = value.strip_prefix("//") {
        return Cow::Owned(format!("https://{}", rest));
    }
    let www = value.get(..4).map_or(false, |p| p.eq_ignore_ascii_case("www."));
    if www && value.len() > 4 {
        return Cow::Owned(format!("https://{}", value));
    }
    Cow::Borrowed(value)
}

/// Step 5: prefix `https://` onto a bare `label.tld[/path]` value.
pub fn complete_bare_domain(value: &str) -> Cow<'_, str> {
    if BARE_DOMAIN.is_match(value) {
        Cow::Owned(format!("https://{}", value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Steps 6 to 9: percent-encode according to what the value turned out to be.
fn encode_resolved(value: &str) -> String {
    if is_web_href(value) {
        return encode_web_url(value);
    }
    if value.starts_with('#') || value.starts_with('/') {
        return encode_preserving_escapes(value);
    }
    if let Some(caps) = SCHEME.captures(value) {
        let scheme = caps[1].to_ascii_lowercase();
        if PASSTHROUGH_SCHEMES.contains(&scheme.as_str()) {
            return format!("{}:{}", scheme, encode_preserving_escapes(&caps[2]));
        }
        if BLOCKED_SCHEMES.contains(&scheme.as_str()) {
            tracing::warn!(scheme = %scheme, "Replacing script-capable href with placeholder");
            return PLACEHOLDER_HREF.to_string();
        }
    }

    tracing::debug!(href = %value, "Unresolvable href kept verbatim");
    encode_preserving_escapes(value)
}

/// Serialize an `http(s)` URL through the WHATWG parser, which encodes path,
/// query and fragment without touching existing escapes. Values the parser
/// rejects (e.g. a space in the host) fall back to plain escaping.
fn encode_web_url(value: &str) -> String {
    match Url::parse(value) {
        // The host parser lets '"' through.
        Ok(url) if url.has_host() && !url.as_str().contains('"') => url.into(),
        _ => encode_preserving_escapes(value),
    }
}

/// Percent-encode unsafe characters while leaving valid `%XX` escapes alone,
/// so encoding an already-encoded value is a no-op.
pub fn encode_preserving_escapes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut buf = [0u8; 4];
    for (index, ch) in value.char_indices() {
        if ch == '%' && is_escape_at(value, index) {
            out.push('%');
        } else {
            out.extend(utf8_percent_encode(ch.encode_utf8(&mut buf), HREF_ENCODE_SET));
        }
    }
    out
}

fn is_escape_at(value: &str, index: usize) -> bool {
    value
        .as_bytes()
        .get(index + 1..index + 3)
        .map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit))
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}'
    )
}

fn is_quote(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '`' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | '\u{00AB}' | '\u{00BB}'
    )
}

fn unbalanced(value: &str, open: char, close: char) -> bool {
    value.matches(open).count() < value.matches(close).count()
}
