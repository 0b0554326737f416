//! Line filters: which source lines a run may edit.
//!
//! Every codemod consults [`LineFilter::allows`] at the moment it discovers
//! a candidate construct, so a suppressed edit never blocks unrelated edits
//! elsewhere in the same file.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::error::LineSpecError;

/// Inclusive 1-indexed line ranges, kept as ranges so `1-4000000000` costs
/// one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRanges(Vec<RangeInclusive<usize>>);

impl LineRanges {
    /// No lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `start..=end`.
    pub fn push(&mut self, range: RangeInclusive<usize>) {
        self.0.push(range);
    }

    /// Whether `line` falls in any range.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.0.iter().any(|range| range.contains(&line))
    }

    /// Whether no range was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ranges in insertion order.
    #[must_use]
    pub fn ranges(&self) -> &[RangeInclusive<usize>] {
        &self.0
    }
}

impl Extend<RangeInclusive<usize>> for LineRanges {
    fn extend<I: IntoIterator<Item = RangeInclusive<usize>>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for LineRanges {
    type Item = RangeInclusive<usize>;
    type IntoIter = std::vec::IntoIter<RangeInclusive<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<usize> for LineRanges {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().map(|line| line..=line).collect())
    }
}

/// Lines a run is permitted to include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LineSet {
    /// Every line.
    #[default]
    All,
    /// Only these 1-indexed lines.
    Lines(LineRanges),
}

impl LineSet {
    /// Whether `line` is in the set.
    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        match self {
            Self::All => true,
            Self::Lines(lines) => lines.contains(line),
        }
    }
}

/// Per-file include/exclude policy. Exclusion always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFilter {
    include: LineSet,
    exclude: LineRanges,
}

impl LineFilter {
    /// Filter allowing every line.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter from explicit include and exclude sets.
    #[must_use]
    pub fn new(include: LineSet, exclude: LineRanges) -> Self {
        Self { include, exclude }
    }

    /// Whether an edit at 1-indexed `line` is permitted.
    #[must_use]
    pub fn allows(&self, line: usize) -> bool {
        !self.exclude.contains(line) && self.include.contains(line)
    }

    /// Included lines.
    #[must_use]
    pub fn include(&self) -> &LineSet {
        &self.include
    }

    /// Excluded lines.
    #[must_use]
    pub fn exclude(&self) -> &LineRanges {
        &self.exclude
    }
}

/// Caller-supplied line filters keyed by root-relative path.
#[derive(Debug, Clone, Default)]
pub struct LineFilterSpec {
    filters: HashMap<String, LineFilter>,
}

impl LineFilterSpec {
    /// Empty spec: every file gets [`LineFilter::all`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `path` to the given lines (merged with earlier includes).
    pub fn include_lines(&mut self, path: impl Into<String>, lines: LineRanges) {
        let filter = self.filters.entry(path.into()).or_default();
        if let LineSet::Lines(existing) = &mut filter.include {
            existing.extend(lines);
        } else {
            filter.include = LineSet::Lines(lines);
        }
    }

    /// Forbid edits on the given lines of `path`.
    pub fn exclude_lines(&mut self, path: impl Into<String>, lines: LineRanges) {
        self.filters
            .entry(path.into())
            .or_default()
            .exclude
            .extend(lines);
    }

    /// Parse and add a `PATH:SPEC` include argument.
    ///
    /// # Errors
    ///
    /// Returns a `LineSpecError` for a malformed argument.
    pub fn add_include_arg(&mut self, arg: &str) -> Result<(), LineSpecError> {
        let (path, lines) = parse_path_lines(arg)?;
        self.include_lines(path, lines);
        Ok(())
    }

    /// Parse and add a `PATH:SPEC` exclude argument.
    ///
    /// # Errors
    ///
    /// Returns a `LineSpecError` for a malformed argument.
    pub fn add_exclude_arg(&mut self, arg: &str) -> Result<(), LineSpecError> {
        let (path, lines) = parse_path_lines(arg)?;
        self.exclude_lines(path, lines);
        Ok(())
    }

    /// Filter for a root-relative path; unlisted files allow every line.
    #[must_use]
    pub fn for_file(&self, relative: &str) -> LineFilter {
        self.filters.get(relative).cloned().unwrap_or_default()
    }

    /// Whether no filter is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Parse `3,7-9` into the ranges `3..=3` and `7..=9`.
///
/// # Errors
///
/// `Invalid` for tokens that are not numbers or ranges (including reversed
/// ranges) and for a spec naming no lines at all, `ZeroLine` for line 0.
pub fn parse_line_spec(spec: &str) -> Result<LineRanges, LineSpecError> {
    let mut lines = LineRanges::new();
    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let invalid = || LineSpecError::Invalid(token.to_string());
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (
                a.trim().parse::<usize>().map_err(|_| invalid())?,
                b.trim().parse::<usize>().map_err(|_| invalid())?,
            ),
            None => {
                let n = token.parse::<usize>().map_err(|_| invalid())?;
                (n, n)
            }
        };
        if start == 0 || end == 0 {
            return Err(LineSpecError::ZeroLine(token.to_string()));
        }
        if end < start {
            return Err(invalid());
        }
        lines.push(start..=end);
    }
    if lines.is_empty() {
        return Err(LineSpecError::Invalid(spec.to_string()));
    }
    Ok(lines)
}

fn parse_path_lines(arg: &str) -> Result<(String, LineRanges), LineSpecError> {
    let (path, spec) = arg
        .rsplit_once(':')
        .filter(|(p, s)| !p.is_empty() && !s.is_empty())
        .ok_or_else(|| LineSpecError::MissingPath(arg.to_string()))?;
    Ok((path.to_string(), parse_line_spec(spec)?))
}
