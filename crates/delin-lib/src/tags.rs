/// Marker substring that flags an abnormally early beat.
pub const PREMATURE_MARKER: &str = "premature";

/// Join the two tag columns. A comma appears only when both sides are non-empty.
pub fn merge_tags(tag1: &str, tag2: &str) -> String {
    match (tag1.is_empty(), tag2.is_empty()) {
        (false, false) => format!("{},{}", tag1, tag2),
        (false, true) => tag1.to_string(),
        (true, _) => tag2.to_string(),
    }
}

/// Case-sensitive substring match against the normalized tag string.
pub fn has_marker(tags: &str, marker: &str) -> bool {
    tags.contains(marker)
}

pub fn is_premature(tags: &str) -> bool {
    has_marker(tags, PREMATURE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_skips_empty_fields() {
        assert_eq!(merge_tags("premature", ""), "premature");
        assert_eq!(merge_tags("", "premature"), "premature");
        assert_eq!(merge_tags("", ""), "");
        assert_eq!(merge_tags("premature", "noisy"), "premature,noisy");
    }

    #[test]
    fn premature_match_is_case_sensitive_substring() {
        assert!(is_premature("premature"));
        assert!(is_premature("noisy,premature"));
        assert!(is_premature("supraventricular-premature"));
        assert!(!is_premature("Premature"));
        assert!(!is_premature("PREMATURE"));
        assert!(!is_premature(""));
    }

    #[test]
    fn custom_marker() {
        assert!(has_marker("ectopic,noisy", "ectopic"));
        assert!(!has_marker("ectopic,noisy", "premature"));
    }
}
