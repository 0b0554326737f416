//! Error types for the codemod engine.
//!
//! Two families: configuration errors abort a run before any file is
//! touched ([`EngineError`] and its parts); [`CodemodError`] is a per-file,
//! per-codemod failure that is recorded and never stops the run.

use std::path::PathBuf;

use codemod_ast::AstError;
use codemod_edit::EditError;
use codemod_io::IoError;
use thiserror::Error;

/// File selection setup errors.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// Root directory is missing or not a directory.
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// An include or exclude glob failed to compile.
    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying globset error.
        #[source]
        source: globset::Error,
    },
}

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A codemod with this id is already registered.
    #[error("Duplicate codemod id: {0}")]
    DuplicateRuleId(String),

    /// No codemod with this id exists.
    #[error("Codemod not found: {0}")]
    NotFound(String),

    /// Registration attempted after the registry was closed.
    #[error("Registry is closed; cannot register {0}")]
    RegistryClosed(String),
}

/// Line range specification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineSpecError {
    /// A token is neither a line number nor a `start-end` range.
    #[error("Invalid line specification `{0}`")]
    Invalid(String),

    /// Line numbers are 1-indexed.
    #[error("Line numbers start at 1, got 0 in `{0}`")]
    ZeroLine(String),

    /// `PATH:SPEC` argument without a path or spec.
    #[error("Expected PATH:LINES, got `{0}`")]
    MissingPath(String),
}

/// Errors loading semantic findings.
#[derive(Debug, Error)]
pub enum FindingsError {
    /// Findings file could not be read.
    #[error("Failed to read findings {path}: {source}")]
    Read {
        /// Findings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Findings file is not a valid findings document.
    #[error("Failed to parse findings {path}: {source}")]
    Parse {
        /// Findings file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Explicit settings file could not be read.
    #[error("Failed to read settings {path}: {source}")]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML for the settings schema.
    #[error("Failed to parse settings {path}: {source}")]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A `line_filters` entry has an invalid line specification.
    #[error("Invalid line filter for {path}: {source}")]
    LineFilter {
        /// File the filter applies to.
        path: String,
        /// Underlying parse error.
        #[source]
        source: LineSpecError,
    },
}

/// Fatal configuration errors: surfaced immediately, no report produced.
#[derive(Debug, Error)]
pub enum EngineError {
    /// File selection could not be set up.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// Registry misuse or unknown codemod id.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Findings input unusable.
    #[error(transparent)]
    Findings(#[from] FindingsError),

    /// Settings file unusable.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Line filter specification unusable.
    #[error(transparent)]
    LineSpec(#[from] LineSpecError),
}

/// A single codemod failing on a single file.
#[derive(Debug, Error)]
pub enum CodemodError {
    /// Source file could not be read.
    #[error("Read error: {0}")]
    Io(#[from] IoError),

    /// Source file (or a rewritten tree) does not parse.
    #[error("Parse error: {0}")]
    Parse(#[from] AstError),

    /// Edits could not be applied.
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Rule-specific failure.
    #[error("Transform error: {0}")]
    Transform(String),

    /// The codemod panicked.
    #[error("Codemod panicked: {0}")]
    Panicked(String),
}
