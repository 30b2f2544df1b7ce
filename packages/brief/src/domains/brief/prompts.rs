//! Prompts for the synthesis provider.

use crate::common::utils::truncate_text;
use crate::domains::brief::models::{BriefType, SourceRecord};

const RESEARCH_SCOPE: &str = "You are the Workday AI Research Agent for Deloitte's Workday practice. \
Produce a JSON object exactly matching the schema you are given. \
Cover Workday, Workday HCM (Human Capital Management), Workday AI and Illuminate, agentic AI for Workday, \
broader AI for HR technology, consultant upskilling, and SI/GSI competitive moves. \
Include a working URL for every claim and explain why each item matters to Deloitte's Workday practice.";

const DAILY_FOCUS: &str = "This is the daily brief: keep it to about 250 words.";

const WEEKLY_FOCUS: &str = "This is the weekly deep dive: write 600-900 words and include a short \
section titled 'What changed this week'.";

const SOURCE_RULES: &str = "Prefer the numbered sources below. Cite them by URL, do not invent URLs, \
and skip anything that is not supported by a source.";

const NO_SOURCE_RULES: &str = "No pre-gathered sources are available for this run. Only cite URLs \
you are confident exist, such as official Workday pages.";

pub const SCHEMA_PROMPT: &str = r#"Return JSON ONLY in this shape:
{
  "type": "daily or weekly",
  "run_date": "YYYY-MM-DD",
  "title": "Short headline",
  "priority_focus": "1-2 sentences on what matters most now",
  "highlights": [ { "headline": "...", "why_it_matters": "...", "source_url": "https://..." } ],
  "competitive_watch": [ { "competitor": "Name", "move": "...", "implication": "..." } ],
  "enablement": [ { "skill": "Topic", "resource_url": "https://...", "90_day_outcome": "..." } ],
  "actions_next_week": ["..."],
  "risks": [ { "risk": "...", "mitigation": "..." } ],
  "sources": [ { "title": "...", "url": "https://..." } ],
  "html_body": "<h2>...</h2> (well-formatted HTML with <a href=\"https://...\"> links)",
  "plain_text_body": "Text-only with visible URLs"
}"#;

const SNIPPET_CHARS: usize = 300;

pub fn system_prompt(brief_type: BriefType) -> String {
    let focus = match brief_type {
        BriefType::Daily => DAILY_FOCUS,
        BriefType::Weekly => WEEKLY_FOCUS,
    };
    format!("{} {}", RESEARCH_SCOPE, focus)
}

/// Schema, run parameters, then the numbered source list (if any).
pub fn user_prompt(brief_type: BriefType, run_date: &str, sources: &[SourceRecord]) -> String {
    let mut prompt = format!(
        "{schema}\n\nParameters:\n- Set \"type\": \"{kind}\".\n- Set \"run_date\": \"{date}\".\n",
        schema = SCHEMA_PROMPT,
        kind = brief_type.as_str(),
        date = run_date,
    );

    if sources.is_empty() {
        prompt.push_str(&format!("\n{}\n", NO_SOURCE_RULES));
        return prompt;
    }

    prompt.push_str(&format!("\n{}\n\nSources:\n", SOURCE_RULES));
    for (index, source) in sources.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n   {}\n", index + 1, source.title, source.url));
        if let Some(date) = &source.published_date {
            prompt.push_str(&format!("   Published: {}\n", date));
        }
        if !source.snippet.is_empty() {
            prompt.push_str(&format!("   {}\n", truncate_text(&source.snippet, SNIPPET_CHARS)));
        }
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompts_differ_by_type() {
        assert!(system_prompt(BriefType::Daily).contains("250 words"));
        let weekly = system_prompt(BriefType::Weekly);
        assert!(weekly.contains("600-900 words"));
        assert!(weekly.contains("What changed this week"));
    }

    #[test]
    fn test_user_prompt_numbers_sources() {
        let sources = vec![
            SourceRecord {
                title: "Workday Rising recap".into(),
                url: "https://newsroom.workday.com/a".into(),
                snippet: "Agents announced".into(),
                published_date: Some("2026-10-17".into()),
            },
            SourceRecord {
                title: "HR Dive".into(),
                url: "https://hrdive.com/b".into(),
                snippet: String::new(),
                published_date: None,
            },
        ];
        let prompt = user_prompt(BriefType::Daily, "2026-10-18", &sources);
        assert!(prompt.contains("\"run_date\": \"2026-10-18\""));
        assert!(prompt.contains("1. Workday Rising recap\n   https://newsroom.workday.com/a"));
        assert!(prompt.contains("2. HR Dive"));
        assert!(prompt.contains("Published: 2026-10-17"));
    }

    #[test]
    fn test_user_prompt_without_sources() {
        let prompt = user_prompt(BriefType::Weekly, "2026-10-18", &[]);
        assert!(prompt.contains("\"type\": \"weekly\""));
        assert!(prompt.contains("No pre-gathered sources"));
        assert!(!prompt.contains("Sources:"));
    }
}
