use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::BasePublishSink;

/// Writes pages into a static-site directory (GitHub Pages `docs/`).
///
/// Each page goes to a hidden sibling temp file first and is renamed into
/// place, so readers see the old page or the new one, never a partial write.
pub struct DocsDirSink {
    dir: PathBuf,
}

impl DocsDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BasePublishSink for DocsDirSink {
    async fn publish(&self, filename: &str, html: &str) -> Result<PathBuf> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            anyhow::bail!("Invalid page filename: {:?}", filename);
        }

        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let target = self.dir.join(filename);
        let tmp = self.dir.join(format!(".{}.tmp", filename));

        fs::write(&tmp, html)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("Failed to move page into {}", target.display()));
        }

        info!(path = %target.display(), bytes = html.len(), "Published page");
        Ok(target)
    }
}
