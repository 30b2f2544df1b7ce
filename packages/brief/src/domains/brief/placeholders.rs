//! Built-in briefs used when no live synthesis result is available.

use crate::domains::brief::models::{
    Brief, BriefType, CompetitiveMove, EnablementItem, Highlight, Risk, SourceLink,
};

const WORKDAY_AI_URL: &str = "https://www.workday.com/en-us/artificial-intelligence.html";
const WORKDAY_NEWSROOM_URL: &str = "https://newsroom.workday.com/";
const WORKDAY_HCM_URL: &str =
    "https://www.workday.com/en-us/products/human-capital-management/overview.html";

/// Sample brief for runs without provider credentials (or when every
/// synthesis attempt failed). Links point at live Workday pages.
///
/// `html_body` is left empty; normalization renders it from the sections.
pub fn placeholder_brief(brief_type: BriefType, run_date: &str) -> Brief {
    let mut brief = Brief {
        brief_type: Some(brief_type),
        title: "Workday HCM + AI Brief (placeholder)".to_string(),
        priority_focus: "Live research was not available for this run. The items below are \
                         standing reference points for the Workday AI roadmap."
            .to_string(),
        highlights: vec![
            Highlight {
                headline: "Workday AI and agents overview".to_string(),
                why_it_matters: "Baseline for client conversations on Workday's AI roadmap."
                    .to_string(),
                source_url: WORKDAY_AI_URL.to_string(),
            },
            Highlight {
                headline: "Workday newsroom".to_string(),
                why_it_matters: "Primary source for product and partner announcements."
                    .to_string(),
                source_url: WORKDAY_NEWSROOM_URL.to_string(),
            },
        ],
        competitive_watch: vec![CompetitiveMove {
            competitor: "Other Workday SIs".to_string(),
            r#move: "Packaging AI agent accelerators for HCM deployments.".to_string(),
            implication: "Keep our own accelerator story current.".to_string(),
        }],
        enablement: vec![EnablementItem {
            skill: "Workday HCM fundamentals".to_string(),
            resource_url: WORKDAY_HCM_URL.to_string(),
            outcome_90_day: "Every consultant can demo the AI features in core HCM.".to_string(),
        }],
        actions_next_week: vec![
            "Configure OPENAI_API_KEY and TAVILY_API_KEY to enable live research.".to_string(),
        ],
        risks: vec![Risk {
            risk: "Stale insight while live research is unavailable.".to_string(),
            mitigation: "Check the Workday newsroom directly until the brief is live again."
                .to_string(),
        }],
        sources: vec![
            SourceLink {
                title: "Workday AI".to_string(),
                url: WORKDAY_AI_URL.to_string(),
            },
            SourceLink {
                title: "Workday Newsroom".to_string(),
                url: WORKDAY_NEWSROOM_URL.to_string(),
            },
        ],
        html_body: String::new(),
        plain_text_body: format!(
            "Live research was not available for this run.\nWorkday AI: {}\nWorkday Newsroom: {}",
            WORKDAY_AI_URL, WORKDAY_NEWSROOM_URL
        ),
        ..Default::default()
    };
    brief.fill_defaults(brief_type, run_date);
    brief
}

/// Brief for runs where the search found nothing in the recency window.
pub fn no_results_brief(brief_type: BriefType, run_date: &str) -> Brief {
    let days = brief_type.recency_days();
    let mut brief = Brief {
        brief_type: Some(brief_type),
        title: "No material updates".to_string(),
        priority_focus: format!(
            "No material Workday AI news was found in the last {} days.",
            days
        ),
        html_body: format!(
            "<h2>No material results</h2><p>No material Workday AI news was found in the last {} days. \
             The next run will check again.</p>",
            days
        ),
        plain_text_body: format!(
            "No material Workday AI news was found in the last {} days.",
            days
        ),
        ..Default::default()
    };
    brief.fill_defaults(brief_type, run_date);
    brief
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_sections_and_live_links() {
        let brief = placeholder_brief(BriefType::Weekly, "2026-10-18");
        assert_eq!(brief.brief_type, Some(BriefType::Weekly));
        assert_eq!(brief.run_date, "2026-10-18");
        assert!(brief.has_structured_content());
        assert!(brief.html_body.is_empty());
        assert!(brief
            .highlights
            .iter()
            .all(|h| h.source_url.starts_with("https://")));
    }

    #[test]
    fn test_no_results_brief() {
        let brief = no_results_brief(BriefType::Daily, "2026-10-18");
        assert!(!brief.has_structured_content());
        assert!(brief.html_body.contains("last 2 days"));
        assert_eq!(brief.title, "No material updates");
    }
}
