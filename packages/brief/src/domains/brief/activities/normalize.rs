//! Normalization of a synthesized Brief before publishing.
//!
//! Runs exactly once per brief. Never fails: malformed markup degrades link
//! by link, and a body that ends up empty becomes a short notice.

use link_rewrite::{autolink, has_anchor, normalize_href, LinkRewriter};
use tracing::{debug, info};

use super::render::render_structured;
use crate::domains::brief::models::Brief;

pub const EMPTY_BODY: &str = "<h2>No content</h2>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Publish the provider's markup without rewriting links.
    pub preserve_markup: bool,
}

/// Normalize record URLs and rewrite `html_body` into safe markup.
///
/// 1. URL fields of highlights, enablement items and sources go through
///    `normalize_href`; blank fields stay blank.
/// 2. A body without anchors gets the autolink pre-pass. If it still has no
///    anchors and any structured section is non-empty, the body is rendered
///    from the sections instead.
/// 3. The result goes through the link rewriter.
/// 4. A blank result becomes [`EMPTY_BODY`].
pub fn normalize_brief(brief: &mut Brief, options: NormalizeOptions) {
    normalize_record_urls(brief);

    let body = brief.html_body.trim();
    let candidate = if options.preserve_markup || has_anchor(body) {
        body.to_string()
    } else {
        autolink(body)
    };

    let fragment = if !has_anchor(&candidate) && brief.has_structured_content() {
        info!(
            body_blank = candidate.trim().is_empty(),
            "Body has no links; rendering from structured sections"
        );
        render_structured(brief)
    } else {
        candidate
    };

    let rewritten = LinkRewriter::new(options.preserve_markup).rewrite(&fragment);
    brief.html_body = if rewritten.trim().is_empty() {
        debug!("Normalized body is empty");
        EMPTY_BODY.to_string()
    } else {
        rewritten
    };
}

fn normalize_record_urls(brief: &mut Brief) {
    let normalize = |url: &mut String| {
        if !url.trim().is_empty() {
            *url = normalize_href(url);
        }
    };
    brief
        .highlights
        .iter_mut()
        .for_each(|h| normalize(&mut h.source_url));
    brief
        .enablement
        .iter_mut()
        .for_each(|e| normalize(&mut e.resource_url));
    brief.sources.iter_mut().for_each(|s| normalize(&mut s.url));
}
