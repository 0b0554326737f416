//! Package metadata types shared by manifest parsers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Manifest format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    /// `requirements.txt`
    RequirementsTxt,
    /// `pyproject.toml`
    PyprojectToml,
    /// `setup.cfg`
    SetupCfg,
}

/// Declared dependencies of one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStore {
    /// Manifest format.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Manifest path.
    pub file: PathBuf,
    /// Requirement strings as declared.
    pub dependencies: BTreeSet<String>,
    /// Declared Python version constraints.
    pub py_versions: Vec<String>,
}

/// Manifest parsing failures. Always swallowed by the analyzer.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest could not be read.
    #[error("Failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    /// TOML syntax error.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// INI syntax error.
    #[error("Invalid INI at line {line}: {message}")]
    Ini {
        /// 1-indexed line.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Parser for one manifest format.
pub trait ManifestParser: Send + Sync {
    /// Format handled by this parser.
    fn file_type(&self) -> FileType;

    /// File name looked up at the project root.
    fn file_name(&self) -> &'static str;

    /// Parse `file`. `Ok(None)` means the file has no package metadata.
    ///
    /// # Errors
    ///
    /// Returns a `ManifestError` when the file cannot be read or parsed.
    fn parse_file(&self, file: &Path) -> Result<Option<PackageStore>, ManifestError>;
}
