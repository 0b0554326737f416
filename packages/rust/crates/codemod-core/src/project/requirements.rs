//! `requirements.txt` parser.

use std::collections::BTreeSet;
use std::path::Path;

use super::package_store::{FileType, ManifestError, ManifestParser, PackageStore};

/// Line-based requirements parser; comments and pip options are skipped.
pub struct RequirementsTxtParser;

impl ManifestParser for RequirementsTxtParser {
    fn file_type(&self) -> FileType {
        FileType::RequirementsTxt
    }

    fn file_name(&self) -> &'static str {
        "requirements.txt"
    }

    fn parse_file(&self, file: &Path) -> Result<Option<PackageStore>, ManifestError> {
        let content = std::fs::read_to_string(file)?;
        Ok(Some(PackageStore {
            file_type: self.file_type(),
            file: file.to_path_buf(),
            dependencies: parse_requirements(&content),
            py_versions: Vec::new(),
        }))
    }
}

fn parse_requirements(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(|line| match line.find(" #") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(str::to_string)
        .collect()
}
