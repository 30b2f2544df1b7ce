/// Pure utility functions for content manipulation

/// Truncate to at most `max_chars` characters, appending "..." when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_text("  Short snippet ", 250), "Short snippet");
    }

    #[test]
    fn test_long_text_truncated() {
        let long = "a".repeat(300);
        let truncated = truncate_text(&long, 250);
        assert_eq!(truncated.chars().count(), 250);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "世界".repeat(10);
        let truncated = truncate_text(&text, 5);
        assert_eq!(truncated, "世界...");
    }
}
