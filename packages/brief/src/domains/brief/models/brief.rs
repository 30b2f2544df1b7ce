use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TITLE: &str = "Workday HCM + AI Brief";

/// Run type: selects word-count target, recency window and output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefType {
    Daily,
    Weekly,
}

impl BriefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BriefType::Daily => "daily",
            BriefType::Weekly => "weekly",
        }
    }

    /// Capitalized form used in email subjects.
    pub fn label(&self) -> &'static str {
        match self {
            BriefType::Daily => "Daily",
            BriefType::Weekly => "Weekly",
        }
    }

    /// Page written under the docs directory.
    pub fn page_filename(&self) -> &'static str {
        match self {
            BriefType::Daily => "index.html",
            BriefType::Weekly => "weekly.html",
        }
    }

    /// How many days back acquisition looks.
    pub fn recency_days(&self) -> u32 {
        match self {
            BriefType::Daily => 2,
            BriefType::Weekly => 7,
        }
    }

    /// Case-insensitive parse of a provider-supplied value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(BriefType::Daily),
            "weekly" => Some(BriefType::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for BriefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub headline: String,
    pub why_it_matters: String,
    pub source_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveMove {
    pub competitor: String,
    pub r#move: String,
    pub implication: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnablementItem {
    pub skill: String,
    pub resource_url: String,
    #[serde(rename = "90_day_outcome")]
    pub outcome_90_day: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub risk: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

/// The structured research document for one run.
///
/// Field names match the JSON object the synthesis provider is asked for.
/// Sequence order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brief {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub brief_type: Option<BriefType>,
    pub run_date: String,
    pub title: String,
    pub priority_focus: String,
    pub highlights: Vec<Highlight>,
    pub competitive_watch: Vec<CompetitiveMove>,
    pub enablement: Vec<EnablementItem>,
    pub actions_next_week: Vec<String>,
    pub risks: Vec<Risk>,
    pub sources: Vec<SourceLink>,
    pub html_body: String,
    pub plain_text_body: String,
}

impl Brief {
    /// True when any structured section has at least one entry.
    pub fn has_structured_content(&self) -> bool {
        !self.highlights.is_empty()
            || !self.competitive_watch.is_empty()
            || !self.enablement.is_empty()
            || !self.actions_next_week.is_empty()
            || !self.risks.is_empty()
            || !self.sources.is_empty()
    }

    /// Default-fill `type` and `title`; always overwrite `run_date` so the
    /// page, the email subject and the snapshots agree on one date.
    pub fn fill_defaults(&mut self, brief_type: BriefType, run_date: &str) {
        self.brief_type.get_or_insert(brief_type);
        if self.title.trim().is_empty() {
            self.title = DEFAULT_TITLE.to_string();
        }
        self.run_date = run_date.to_string();
    }

    pub fn brief_type_or(&self, fallback: BriefType) -> BriefType {
        self.brief_type.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_shape() {
        let json = r#"{
            "type": "weekly",
            "run_date": "2026-10-01",
            "title": "Agents everywhere",
            "highlights": [{"headline": "H", "why_it_matters": "W", "source_url": "https://x.com"}],
            "competitive_watch": [{"competitor": "Accenture", "move": "M", "implication": "I"}],
            "enablement": [{"skill": "Illuminate", "resource_url": "workday.com", "90_day_outcome": "O"}],
            "actions_next_week": ["Do it"],
            "extra_field": 1
        }"#;
        let brief: Brief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.brief_type, Some(BriefType::Weekly));
        assert_eq!(brief.competitive_watch[0].r#move, "M");
        assert_eq!(brief.enablement[0].outcome_90_day, "O");
        assert!(brief.risks.is_empty());
        assert_eq!(brief.html_body, "");
        assert!(brief.has_structured_content());
    }

    #[test]
    fn test_serialize_uses_schema_names() {
        let brief = Brief {
            brief_type: Some(BriefType::Daily),
            enablement: vec![EnablementItem {
                skill: "S".into(),
                resource_url: "https://x.com".into(),
                outcome_90_day: "O".into(),
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&brief).unwrap();
        assert_eq!(value["type"], "daily");
        assert_eq!(value["enablement"][0]["90_day_outcome"], "O");
    }

    #[test]
    fn test_fill_defaults() {
        let mut brief = Brief {
            run_date: "1999-01-01".into(),
            ..Default::default()
        };
        brief.fill_defaults(BriefType::Daily, "2026-10-18");
        assert_eq!(brief.brief_type, Some(BriefType::Daily));
        assert_eq!(brief.title, DEFAULT_TITLE);
        assert_eq!(brief.run_date, "2026-10-18");

        let mut weekly = Brief {
            brief_type: Some(BriefType::Weekly),
            title: "Kept".into(),
            ..Default::default()
        };
        weekly.fill_defaults(BriefType::Daily, "2026-10-18");
        assert_eq!(weekly.brief_type, Some(BriefType::Weekly));
        assert_eq!(weekly.title, "Kept");
    }

    #[test]
    fn test_brief_type_helpers() {
        assert_eq!(BriefType::parse(" Weekly "), Some(BriefType::Weekly));
        assert_eq!(BriefType::parse("monthly"), None);
        assert_eq!(BriefType::Daily.page_filename(), "index.html");
        assert_eq!(BriefType::Weekly.page_filename(), "weekly.html");
        assert_eq!(BriefType::Weekly.recency_days(), 7);
        assert_eq!(BriefType::Daily.label(), "Daily");
    }
}
