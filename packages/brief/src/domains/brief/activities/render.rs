//! HTML rendered straight from the structured sections of a Brief.
//!
//! Used when the provider's `html_body` is missing or has no links. Section
//! order is fixed; empty sections are left out entirely. Text is escaped,
//! URLs go through `normalize_href`.

use link_rewrite::{escape_attribute, escape_text, normalize_href};

use crate::domains::brief::models::Brief;

pub fn render_structured(brief: &Brief) -> String {
    let mut html = String::new();

    if !brief.title.trim().is_empty() {
        html.push_str(&format!("<h2>{}</h2>", escape_text(brief.title.trim())));
    }
    if !brief.priority_focus.trim().is_empty() {
        html.push_str(&format!(
            "<p><strong>Priority focus:</strong> {}</p>",
            escape_text(brief.priority_focus.trim())
        ));
    }

    push_section(
        &mut html,
        "Highlights",
        brief.highlights.iter().map(|h| {
            join_parts(&[
                link_or_strong(&h.headline, &h.source_url),
                plain(&h.why_it_matters),
            ])
        }),
    );

    push_section(
        &mut html,
        "Competitive Watch",
        brief.competitive_watch.iter().map(|c| {
            join_parts(&[
                strong(&c.competitor),
                plain(&c.r#move),
                labelled("Implication", &c.implication),
            ])
        }),
    );

    push_section(
        &mut html,
        "Enablement",
        brief.enablement.iter().map(|e| {
            join_parts(&[
                link_or_strong(&e.skill, &e.resource_url),
                labelled("90-day outcome", &e.outcome_90_day),
            ])
        }),
    );

    push_section(
        &mut html,
        "Actions for Next Week",
        brief.actions_next_week.iter().map(|action| plain(action)),
    );

    push_section(
        &mut html,
        "Risks &amp; Mitigations",
        brief.risks.iter().map(|r| {
            join_parts(&[strong(&r.risk), labelled("Mitigation", &r.mitigation)])
        }),
    );

    push_section(
        &mut html,
        "All Sources",
        brief.sources.iter().map(|s| {
            let label = if s.title.trim().is_empty() { &s.url } else { &s.title };
            link_or_strong(label, &s.url)
        }),
    );

    html
}

/// `heading` is already HTML.
fn push_section(html: &mut String, heading: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.filter(|item| !item.is_empty()).collect();
    if items.is_empty() {
        return;
    }
    html.push_str(&format!("<h3>{}</h3><ul>", heading));
    for item in items {
        html.push_str(&format!("<li>{}</li>", item));
    }
    html.push_str("</ul>");
}

fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" – ")
}

fn plain(text: &str) -> String {
    escape_text(text.trim())
}

fn strong(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    format!("<strong>{}</strong>", escape_text(text))
}

fn labelled(label: &str, text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    format!("{}: {}", label, escape_text(text))
}

/// Anchor when there is a URL; the URL itself is the label when the text is
/// blank.
fn link_or_strong(text: &str, url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return strong(text);
    }
    let label = if text.trim().is_empty() { url } else { text.trim() };
    format!(
        "<a href=\"{}\">{}</a>",
        escape_attribute(&normalize_href(url)),
        escape_text(label)
    )
}
