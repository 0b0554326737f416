//! Run settings loader.
//!
//! Loads an optional YAML settings file, by default `<directory>/.codemod.yaml`.
//! Every field is optional; [`CodemodSettings::merge`] layers command-line
//! values over file values (overlay wins).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SettingsError;
use crate::line_filter::{LineFilterSpec, parse_line_spec};

/// Settings file looked up in the run directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = ".codemod.yaml";

/// Per-file line filter entry in the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LineFilterSettings {
    /// Line spec of lines to include (`3,7-9`).
    pub include: Option<String>,
    /// Line spec of lines to exclude.
    pub exclude: Option<String>,
}

/// Optional run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodemodSettings {
    /// File include globs.
    pub path_include: Option<Vec<String>>,
    /// File exclude globs.
    pub path_exclude: Option<Vec<String>>,
    /// Codemod ids to run (empty means all).
    pub codemod_include: Option<Vec<String>>,
    /// Codemod ids to skip.
    pub codemod_exclude: Option<Vec<String>>,
    /// Suppress file writes.
    pub dry_run: Option<bool>,
    /// Worker threads (0 or unset uses every core).
    pub workers: Option<usize>,
    /// Per-file size limit in bytes.
    pub max_file_size: Option<u64>,
    /// Line filters keyed by root-relative path.
    pub line_filters: Option<BTreeMap<String, LineFilterSettings>>,
}

impl CodemodSettings {
    /// Parse settings from YAML text. An empty document yields defaults.
    ///
    /// # Errors
    ///
    /// `SettingsError::Parse` for malformed YAML or unknown keys.
    pub fn from_yaml(raw: &str, path: &Path) -> Result<Self, SettingsError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly requested settings file.
    ///
    /// # Errors
    ///
    /// `SettingsError::Read` when the file is missing or unreadable,
    /// `SettingsError::Parse` when it is malformed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&raw, path)?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Load `<directory>/.codemod.yaml` if it exists.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) once the file exists.
    pub fn load_default(directory: &Path) -> Result<Self, SettingsError> {
        let path = default_settings_path(directory);
        if !path.is_file() {
            debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Layer `overlay` over `self`: every field set in `overlay` wins.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            path_include: overlay.path_include.or(self.path_include),
            path_exclude: overlay.path_exclude.or(self.path_exclude),
            codemod_include: overlay.codemod_include.or(self.codemod_include),
            codemod_exclude: overlay.codemod_exclude.or(self.codemod_exclude),
            dry_run: overlay.dry_run.or(self.dry_run),
            workers: overlay.workers.or(self.workers),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            line_filters: overlay.line_filters.or(self.line_filters),
        }
    }

    /// Add the configured line filters to `spec`.
    ///
    /// # Errors
    ///
    /// `SettingsError::LineFilter` for an invalid line spec.
    pub fn apply_line_filters(&self, spec: &mut LineFilterSpec) -> Result<(), SettingsError> {
        let Some(filters) = &self.line_filters else {
            return Ok(());
        };
        for (path, entry) in filters {
            let invalid = |source| SettingsError::LineFilter {
                path: path.clone(),
                source,
            };
            if let Some(include) = &entry.include {
                spec.include_lines(path.clone(), parse_line_spec(include).map_err(invalid)?);
            }
            if let Some(exclude) = &entry.exclude {
                spec.exclude_lines(path.clone(), parse_line_spec(exclude).map_err(invalid)?);
            }
        }
        Ok(())
    }
}

/// Default settings path for a run directory.
#[must_use]
pub fn default_settings_path(directory: &Path) -> PathBuf {
    directory.join(DEFAULT_SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_wins() {
        let file = CodemodSettings {
            dry_run: Some(false),
            workers: Some(2),
            ..CodemodSettings::default()
        };
        let cli = CodemodSettings {
            dry_run: Some(true),
            ..CodemodSettings::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.dry_run, Some(true));
        assert_eq!(merged.workers, Some(2));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = CodemodSettings::from_yaml("dry_runn: true\n", Path::new("x.yaml"));
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_empty_document_is_default() {
        let settings = CodemodSettings::from_yaml("\n", Path::new("x.yaml")).unwrap();
        assert_eq!(settings, CodemodSettings::default());
    }
}
