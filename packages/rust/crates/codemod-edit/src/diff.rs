//! Diff generation utilities.
//!
//! Provides unified diff output for rewritten files using the `similar` crate.

use similar::TextDiff;

/// Generate a unified diff between two strings.
///
/// Headers carry no file names (`--- ` / `+++ `) and hunks use three lines of
/// context, so the output is stable for snapshot comparison.
///
/// # Returns
/// The unified diff text, or an empty string when both sides are equal.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str) -> String {
    if original == modified {
        return String::new();
    }
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(3)
        .header("", "")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_has_no_file_names() {
        let diff = generate_unified_diff("x = f'a'\n", "x = 'a'\n");
        assert!(diff.starts_with("--- \n+++ \n@@ -1 +1 @@\n"));
    }

    #[test]
    fn test_distant_hunks_are_split() {
        let original: String = (1..=20).map(|i| format!("v{i} = {i}\n")).collect();
        let modified = original.replace("v2 = 2", "v2 = 0").replace("v19 = 19", "v19 = 0");
        let diff = generate_unified_diff(&original, &modified);
        assert_eq!(diff.matches("@@ -").count(), 2);
    }
}
