//! Checks run against the published site.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::domains::brief::models::BriefType;

/// Prefixes a published `href` may start with.
pub const ALLOWED_HREF_PREFIXES: &[&str] =
    &["http://", "https://", "mailto:", "tel:", "sms:", "#", "/"];

lazy_static! {
    static ref HREF_VALUE: Regex =
        Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap();
}

/// Problems found in one page. Empty means the page is valid.
pub fn check_page(html: &str) -> Vec<String> {
    let mut violations = Vec::new();
    if !html.contains("<!DOCTYPE html>") {
        violations.push("missing <!DOCTYPE html>".to_string());
    }
    if !html.contains("<body>") {
        violations.push("missing <body>".to_string());
    }
    for caps in HREF_VALUE.captures_iter(html) {
        let value = (1..=3)
            .find_map(|group| caps.get(group))
            .map_or("", |m| m.as_str());
        if !ALLOWED_HREF_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix))
        {
            violations.push(format!("href {:?} has no allowed prefix", value));
        }
    }
    violations
}

#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub checked: Vec<PathBuf>,
    pub violations: Vec<(PathBuf, String)>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check the daily and weekly pages under `docs_dir`. A missing page counts
/// as a violation.
pub async fn verify_published(docs_dir: &Path) -> VerifyReport {
    let mut report = VerifyReport::default();

    for brief_type in [BriefType::Daily, BriefType::Weekly] {
        let path = docs_dir.join(brief_type.page_filename());
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => {
                for violation in check_page(&html) {
                    error!(path = %path.display(), %violation, "Published page is invalid");
                    report.violations.push((path.clone(), violation));
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Published page is unreadable");
                report
                    .violations
                    .push((path.clone(), format!("unreadable: {}", e)));
            }
        }
        report.checked.push(path);
    }

    if report.is_ok() {
        info!(pages = report.checked.len(), "Published pages are valid");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "<!DOCTYPE html><html><body>\
        <a href=\"https://x.com\">x</a><a href='/rel'>r</a><a href=#top>t</a>\
        <a href=\"mailto:a@b.com\">m</a></body></html>";

    #[test]
    fn test_valid_page() {
        assert!(check_page(VALID).is_empty());
    }

    #[test]
    fn test_invalid_page() {
        let violations =
            check_page("<html><a href=\"javascript:alert(1)\">x</a><a href=\"x.com\">y</a></html>");
        assert_eq!(violations.len(), 4);
        assert!(violations[0].contains("DOCTYPE"));
        assert!(violations[2].contains("javascript:"));
    }

    #[test]
    fn test_empty_href_is_a_violation() {
        assert_eq!(check_page("<!DOCTYPE html><body><a href=\"\">x</a>").len(), 1);
    }

    #[tokio::test]
    async fn test_verify_published() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), VALID).unwrap();

        let report = verify_published(dir.path()).await;
        assert_eq!(report.checked.len(), 2);
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].0.ends_with("weekly.html"));

        std::fs::write(dir.path().join("weekly.html"), VALID).unwrap();
        assert!(verify_published(dir.path()).await.is_ok());
    }
}
