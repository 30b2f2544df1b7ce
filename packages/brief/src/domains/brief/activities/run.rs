//! One scheduled run: acquire → synthesize → normalize → publish.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use super::acquire::gather_sources;
use super::normalize::{normalize_brief, NormalizeOptions};
use super::publish::{publish_brief, write_debug_snapshot, PublishOutcome};
use super::synthesize::{synthesize_brief, SynthesisOptions};
use crate::config::Config;
use crate::domains::brief::models::{Acquisition, Brief, BriefType};
use crate::kernel::BriefDeps;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub brief_type: BriefType,
    pub run_date: String,
    pub source_count: usize,
    pub brief: Brief,
    pub page_path: PathBuf,
    pub email_sent: bool,
}

/// Execute a run for `run_date`, which is computed once by the caller.
pub async fn run_brief(
    brief_type: BriefType,
    run_date: NaiveDate,
    config: &Config,
    deps: &BriefDeps,
) -> Result<RunReport> {
    let run_date = run_date.format("%Y-%m-%d").to_string();
    info!(brief_type = %brief_type, run_date = %run_date, "Starting brief run");

    let acquisition = gather_sources(brief_type, config.search_max_results, deps).await;
    if let Some(dir) = &config.debug_dump_dir {
        let name = format!("sources-{}.json", brief_type);
        write_debug_snapshot(dir, &name, &acquisition.sources()).await;
    }

    let options = SynthesisOptions {
        models: config.openai_models.clone(),
        require_live_result: config.require_live_result,
    };
    let mut brief = synthesize_brief(brief_type, &run_date, &acquisition, &options, deps).await?;

    normalize_brief(
        &mut brief,
        NormalizeOptions {
            preserve_markup: config.preserve_model_html,
        },
    );
    if let Some(dir) = &config.debug_dump_dir {
        let name = format!("brief-{}.json", brief_type);
        write_debug_snapshot(dir, &name, &brief).await;
    }

    let PublishOutcome {
        page_path,
        email_sent,
    } = publish_brief(&brief, brief_type, config.email.as_ref(), deps).await?;

    let source_count = match &acquisition {
        Acquisition::Sources(sources) => sources.len(),
        Acquisition::NoResults | Acquisition::Unavailable => 0,
    };
    info!(
        brief_type = %brief_type,
        sources = source_count,
        page = %page_path.display(),
        email_sent,
        "Brief run complete"
    );

    Ok(RunReport {
        brief_type,
        run_date,
        source_count,
        brief,
        page_path,
        email_sent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{search_result, MockAI, MockSearchService};
    use crate::kernel::TestDependencies;
    use serde_json::json;

    fn config(dump_dir: Option<PathBuf>) -> Config {
        let dump = dump_dir.map(|d| d.display().to_string());
        Config::from_lookup(|key| match key {
            "DEBUG_DUMP_DIR" => dump.clone(),
            _ => None,
        })
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[tokio::test]
    async fn test_run_without_ai_publishes_placeholder() {
        let search = MockSearchService::new()
            .with_results(vec![search_result("Agents GA", "https://newsroom.workday.com/a")]);
        let test_deps = TestDependencies::new().mock_search(search);
        let report = run_brief(BriefType::Daily, date(), &config(None), &test_deps.deps())
            .await
            .unwrap();

        assert_eq!(report.run_date, "2026-10-18");
        assert!(!report.email_sent);
        let page = test_deps.sink.page("index.html").unwrap();
        assert!(page.contains("<h3>Highlights</h3>"));
        assert!(page.contains("target=\"_blank\""));
    }

    #[tokio::test]
    async fn test_empty_search_publishes_no_results_page() {
        let test_deps = TestDependencies::new().mock_ai(MockAI::new());
        let report = run_brief(BriefType::Weekly, date(), &config(None), &test_deps.deps())
            .await
            .unwrap();
        assert_eq!(report.source_count, 0);
        assert!(test_deps.ai.as_ref().unwrap().calls().is_empty());
        let page = test_deps.sink.page("weekly.html").unwrap();
        assert!(page.contains("last 7 days"));
    }

    #[tokio::test]
    async fn test_live_run_normalizes_model_links() {
        let search = MockSearchService::new()
            .with_results(vec![search_result("Agents GA", "https://newsroom.workday.com/a")]);
        let ai = MockAI::new().with_json_response(&json!({
            "title": "Agents week",
            "html_body": "<p>Read <a href=\u{201C}workday.com/agents\u{201D}>this</a></p>",
            "sources": [{"title": "Agents GA", "url": "newsroom.workday.com/a"}]
        }));
        let test_deps = TestDependencies::new().mock_search(search).mock_ai(ai);
        let dump = tempfile::tempdir().unwrap();

        let report = run_brief(
            BriefType::Weekly,
            date(),
            &config(Some(dump.path().to_path_buf())),
            &test_deps.deps(),
        )
        .await
        .unwrap();

        assert_eq!(report.source_count, 1);
        assert_eq!(report.brief.sources[0].url, "https://newsroom.workday.com/a");
        let page = test_deps.sink.page("weekly.html").unwrap();
        assert!(page.contains("<title>Agents week</title>"));
        assert!(page.contains("href=\"https://workday.com/agents\""));
        assert!(dump.path().join("sources-weekly.json").exists());
        assert!(dump.path().join("brief-weekly.json").exists());
    }
}
