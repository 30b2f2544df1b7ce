//! Keys used to recognise the same story arriving from several queries.
//!
//! Pure functions: no I/O, no allocation beyond the returned key.

use url::Url;

/// Query parameters that only carry campaign tracking.
const TRACKING_PARAMS: &[&str] = &["gclid", "fbclid", "mc_cid", "mc_eid", "igshid", "ref_src"];

fn is_tracking_param(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name.as_str())
}

/// Normalized form of a source URL.
///
/// Scheme and host are lowercased, a leading `www.` is dropped, the fragment
/// and tracking parameters are removed, and a trailing slash is ignored.
/// Values that do not parse are compared trimmed and lowercased.
pub fn url_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(mut url) = Url::parse(trimmed) else {
        return trimmed.to_lowercase();
    };

    url.set_fragment(None);
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let query = url.query().map(|q| format!("?{}", q)).unwrap_or_default();

    format!(
        "{}://{}{}{}{}",
        url.scheme(),
        host,
        port,
        url.path().trim_end_matches('/'),
        query
    )
}

/// Lowercased host without `www.`, if the URL has one.
pub fn host_key(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Title normalized for comparison:
/// - lowercase
/// - everything except letters, digits and whitespace removed
/// - whitespace runs collapsed to one space
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
