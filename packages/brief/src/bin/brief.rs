//! Brief runner
//!
//! `brief daily` and `brief weekly` run the pipeline once and publish;
//! `brief verify` checks the published pages.

use anyhow::{Context, Result};
use brief_core::domains::brief::{run_brief, verify_published, BriefType};
use brief_core::kernel::BriefDeps;
use brief_core::Config;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Daily,
    Weekly,
    Verify,
}

#[derive(Debug, Parser)]
#[command(name = "brief", about = "Workday HCM + AI research brief generator")]
struct Cli {
    #[arg(value_enum)]
    mode: Mode,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,brief_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let brief_type = match cli.mode {
        Mode::Daily => BriefType::Daily,
        Mode::Weekly => BriefType::Weekly,
        Mode::Verify => {
            let report = verify_published(&config.docs_dir).await;
            if !report.is_ok() {
                anyhow::bail!(
                    "{} problem(s) in published pages under {}",
                    report.violations.len(),
                    config.docs_dir.display()
                );
            }
            return Ok(());
        }
    };

    let deps = BriefDeps::from_config(&config).context("Failed to build dependencies")?;
    let run_date = Utc::now().date_naive();
    let report = run_brief(brief_type, run_date, &config, &deps).await?;

    tracing::info!(
        page = %report.page_path.display(),
        title = %report.brief.title,
        "Done"
    );
    Ok(())
}
