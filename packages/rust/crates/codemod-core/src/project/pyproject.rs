//! `pyproject.toml` parser (`[project]` table).

use std::path::Path;

use super::package_store::{FileType, ManifestError, ManifestParser, PackageStore};

/// Reads `[project].dependencies` and `requires-python`.
pub struct PyprojectTomlParser;

impl ManifestParser for PyprojectTomlParser {
    fn file_type(&self) -> FileType {
        FileType::PyprojectToml
    }

    fn file_name(&self) -> &'static str {
        "pyproject.toml"
    }

    fn parse_file(&self, file: &Path) -> Result<Option<PackageStore>, ManifestError> {
        let content = std::fs::read_to_string(file)?;
        let doc: toml::Table = content.parse()?;

        let Some(project) = doc.get("project").and_then(toml::Value::as_table) else {
            return Ok(None);
        };

        let dependencies = project
            .get("dependencies")
            .and_then(toml::Value::as_array)
            .map(|deps| {
                deps.iter()
                    .filter_map(toml::Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let py_versions = project
            .get("requires-python")
            .and_then(toml::Value::as_str)
            .map(|v| vec![v.to_string()])
            .unwrap_or_default();

        Ok(Some(PackageStore {
            file_type: self.file_type(),
            file: file.to_path_buf(),
            dependencies,
            py_versions,
        }))
    }
}
