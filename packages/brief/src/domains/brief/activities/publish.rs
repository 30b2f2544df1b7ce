//! Publish activity: page shell, static-site write, email, debug snapshots.

use anyhow::{Context, Result};
use link_rewrite::escape_text;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::EmailConfig;
use crate::domains::brief::models::{Brief, BriefType};
use crate::kernel::{BriefDeps, OutgoingEmail};

const PAGE_STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;max-width:760px;\
                          margin:32px auto;padding:0 16px;line-height:1.5}";

/// Where a run's output went.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub page_path: PathBuf,
    pub email_sent: bool,
}

/// Wrap a normalized fragment in a complete HTML document.
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_text(title.trim()),
        PAGE_STYLE,
        body
    )
}

pub fn email_subject(brief_type: BriefType, title: &str, run_date: &str) -> String {
    format!("{} Research – {} – {}", brief_type.label(), title.trim(), run_date)
}

/// Write the page for the brief's type and, when configured, mail the
/// normalized fragment (not the page shell).
///
/// The brief must already be normalized. Sink and mailer errors propagate.
pub async fn publish_brief(
    brief: &Brief,
    brief_type: BriefType,
    email: Option<&EmailConfig>,
    deps: &BriefDeps,
) -> Result<PublishOutcome> {
    let page = render_page(&brief.title, &brief.html_body);
    let page_path = deps
        .publish_sink
        .publish(brief_type.page_filename(), &page)
        .await
        .context("Failed to publish page")?;

    let Some(email) = email else {
        warn!("Email settings incomplete; skipping send");
        return Ok(PublishOutcome {
            page_path,
            email_sent: false,
        });
    };

    let outgoing = OutgoingEmail {
        from: email.from.clone(),
        to: email.to.clone(),
        subject: email_subject(brief.brief_type_or(brief_type), &brief.title, &brief.run_date),
        html_body: brief.html_body.clone(),
    };
    deps.mailer
        .send(&outgoing)
        .await
        .context("Failed to send brief email")?;
    info!(recipients = outgoing.to.len(), subject = %outgoing.subject, "Brief emailed");

    Ok(PublishOutcome {
        page_path,
        email_sent: true,
    })
}

/// Write `value` as pretty JSON to `dir/name`. Failures are logged, never
/// raised.
pub async fn write_debug_snapshot<T: Serialize>(dir: &Path, name: &str, value: &T) {
    if let Err(e) = try_write_snapshot(dir, name, value).await {
        warn!(dir = %dir.display(), name, error = %e, "Failed to write debug snapshot");
    }
}

async fn try_write_snapshot<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote debug snapshot");
    Ok(())
}
