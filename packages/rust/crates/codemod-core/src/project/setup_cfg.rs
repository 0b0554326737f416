//! `setup.cfg` parser (`[options]` section).

use std::collections::HashMap;
use std::path::Path;

use super::package_store::{FileType, ManifestError, ManifestParser, PackageStore};

/// Reads `install_requires` and `python_requires` from `[options]`.
pub struct SetupCfgParser;

impl ManifestParser for SetupCfgParser {
    fn file_type(&self) -> FileType {
        FileType::SetupCfg
    }

    fn file_name(&self) -> &'static str {
        "setup.cfg"
    }

    fn parse_file(&self, file: &Path) -> Result<Option<PackageStore>, ManifestError> {
        let content = std::fs::read_to_string(file)?;
        let sections = parse_ini(&content)?;

        let Some(options) = sections.get("options") else {
            return Ok(None);
        };

        let dependencies = options
            .get("install_requires")
            .map(|value| {
                value
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let py_versions = options
            .get("python_requires")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
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

type Sections = HashMap<String, HashMap<String, String>>;

/// Minimal INI reader: `[section]` headers, `key = value` / `key: value`
/// pairs, and indented continuation lines appended to the previous value.
fn parse_ini(content: &str) -> Result<Sections, ManifestError> {
    let mut sections: Sections = HashMap::new();
    let mut section: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let continuation = raw.starts_with([' ', '\t']);
        if continuation {
            if let (Some(sec), Some(key)) = (&section, &last_key) {
                if let Some(value) = sections.get_mut(sec).and_then(|s| s.get_mut(key)) {
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }
            return Err(ManifestError::Ini {
                line: line_no,
                message: "continuation line without a key".to_string(),
            });
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            section = Some(name);
            last_key = None;
            continue;
        }

        let Some(sec) = &section else {
            return Err(ManifestError::Ini {
                line: line_no,
                message: "entry before any section header".to_string(),
            });
        };
        let Some(split_at) = trimmed.find(['=', ':']) else {
            return Err(ManifestError::Ini {
                line: line_no,
                message: format!("expected `key = value`, got `{trimmed}`"),
            });
        };
        let key = trimmed[..split_at].trim().to_lowercase();
        let value = trimmed[split_at + 1..].trim().to_string();
        sections
            .entry(sec.clone())
            .or_default()
            .insert(key.clone(), value);
        last_key = Some(key);
    }

    Ok(sections)
}
