//! Change records and per-file change sets.

use serde::{Serialize, Serializer};

/// One atomic edit made by a codemod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// 1-indexed line of the edited construct.
    #[serde(rename = "lineNumber", serialize_with = "line_as_string")]
    pub line: usize,
    /// What the edit did.
    pub description: String,
}

impl Change {
    /// Build a change record.
    pub fn new(line: usize, description: impl Into<String>) -> Self {
        Self {
            line,
            description: description.into(),
        }
    }
}

fn line_as_string<S: Serializer>(line: &usize, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(line)
}

/// All changes one codemod made to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Root-relative path, `/`-separated.
    pub path: String,
    /// Unified diff of pre-image vs post-image.
    pub diff: String,
    /// Changes in ascending line order.
    pub changes: Vec<Change>,
}

impl ChangeSet {
    /// Build a change set; changes are stably ordered by line.
    pub fn new(path: impl Into<String>, diff: impl Into<String>, mut changes: Vec<Change>) -> Self {
        changes.sort_by_key(|c| c.line);
        Self {
            path: path.into(),
            diff: diff.into(),
            changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_serialized_as_string() {
        let json = serde_json::to_value(Change::new(7, "fixed")).unwrap();
        assert_eq!(json["lineNumber"], "7");
        assert_eq!(json["description"], "fixed");
    }

    #[test]
    fn test_changes_sorted_stably() {
        let set = ChangeSet::new(
            "a.py",
            "",
            vec![Change::new(5, "b"), Change::new(2, "a"), Change::new(5, "c")],
        );
        let order: Vec<&str> = set.changes.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
