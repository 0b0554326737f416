//! Project analysis: declared dependencies and Python versions.
//!
//! Parses the manifest files found at the project root. A manifest that
//! cannot be parsed never fails the run: it is logged and treated as
//! "no package metadata found".
//!
//! ```text
//! project/
//! ├── mod.rs            # ProjectAnalyzer
//! ├── package_store.rs  # PackageStore, FileType, ManifestError
//! ├── requirements.rs   # requirements.txt
//! ├── pyproject.rs      # pyproject.toml
//! └── setup_cfg.rs      # setup.cfg
//! ```

mod package_store;
mod pyproject;
mod requirements;
mod setup_cfg;

use std::path::Path;

use tracing::{debug, warn};

pub use package_store::{FileType, ManifestError, ManifestParser, PackageStore};
pub use pyproject::PyprojectTomlParser;
pub use requirements::RequirementsTxtParser;
pub use setup_cfg::SetupCfgParser;

/// Runs every manifest parser against a project root.
pub struct ProjectAnalyzer {
    parsers: Vec<Box<dyn ManifestParser>>,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self {
            parsers: vec![
                Box::new(RequirementsTxtParser),
                Box::new(PyprojectTomlParser),
                Box::new(SetupCfgParser),
            ],
        }
    }
}

impl ProjectAnalyzer {
    /// Analyzer with the built-in parsers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every known manifest present directly under `root`.
    #[must_use]
    pub fn analyze(&self, root: &Path) -> Vec<PackageStore> {
        self.parsers
            .iter()
            .filter_map(|parser| {
                let file = root.join(parser.file_name());
                if !file.is_file() {
                    return None;
                }
                parse_or_none(parser.as_ref(), &file)
            })
            .collect()
    }
}

/// Parse one manifest, swallowing any failure.
#[must_use]
pub fn parse_or_none(parser: &dyn ManifestParser, file: &Path) -> Option<PackageStore> {
    match parser.parse_file(file) {
        Ok(Some(store)) => {
            debug!(
                file = %file.display(),
                dependencies = store.dependencies.len(),
                "parsed package metadata"
            );
            Some(store)
        }
        Ok(None) => {
            debug!(file = %file.display(), "no package metadata found");
            None
        }
        Err(e) => {
            warn!(file = %file.display(), error = %e, "no package metadata found");
            None
        }
    }
}
