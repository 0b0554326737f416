//! Semantic findings: location-tagged signals from an external analyzer.
//!
//! Findings are loaded from a JSON array and partitioned by root-relative
//! file path before any codemod runs.

use std::collections::HashMap;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FindingsError;

/// One finding reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticFinding {
    /// File the finding belongs to (absolute, or relative to the root).
    #[serde(alias = "file_path", alias = "path")]
    pub file_path: String,
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column.
    #[serde(default)]
    pub column: usize,
    /// Rule (or rule file) that produced the finding.
    #[serde(alias = "rule_ref", alias = "ruleId")]
    pub rule_ref: String,
}

impl SemanticFinding {
    /// Build a finding.
    pub fn new(
        file_path: impl Into<String>,
        line: usize,
        column: usize,
        rule_ref: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
            rule_ref: rule_ref.into(),
        }
    }
}

/// Parse a JSON array of findings.
///
/// # Errors
///
/// Returns the JSON error for malformed input.
pub fn parse_findings(json: &str) -> Result<Vec<SemanticFinding>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load findings from a JSON file.
///
/// # Errors
///
/// `FindingsError::Read` or `FindingsError::Parse`.
pub fn load_findings(path: &Path) -> Result<Vec<SemanticFinding>, FindingsError> {
    let json = std::fs::read_to_string(path).map_err(|source| FindingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_findings(&json).map_err(|source| FindingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Findings partitioned by root-relative path, input order preserved.
#[derive(Debug, Clone, Default)]
pub struct FindingIndex {
    by_file: HashMap<String, Vec<SemanticFinding>>,
}

impl FindingIndex {
    /// Partition `findings` by file relative to `root`.
    pub fn new(root: &Path, findings: impl IntoIterator<Item = SemanticFinding>) -> Self {
        let mut by_file: HashMap<String, Vec<SemanticFinding>> = HashMap::new();
        for finding in findings {
            let key = normalize_finding_path(root, &finding.file_path);
            by_file.entry(key).or_default().push(finding);
        }
        debug!(files = by_file.len(), "indexed semantic findings");
        Self { by_file }
    }

    /// Findings for a root-relative path.
    #[must_use]
    pub fn for_file(&self, relative: &str) -> &[SemanticFinding] {
        self.by_file.get(relative).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_file.values().map(Vec::len).sum()
    }

    /// Whether there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}

/// Root-relative, `/`-separated form of a finding path.
fn normalize_finding_path(root: &Path, raw: &str) -> String {
    let path = Path::new(raw);
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir | Component::RootDir | Component::Prefix(_)))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
