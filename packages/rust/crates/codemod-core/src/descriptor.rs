//! Rule descriptors: immutable metadata for each codemod.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How safe a codemod's edits are to merge without human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewRisk {
    /// Mechanical, behavior-preserving edit.
    AutoFix,
    /// Safe in general, but a reviewer should look before merging.
    MergeAfterReview,
    /// Needs a human decision.
    ManualReview,
}

impl ReviewRisk {
    /// Wire name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoFix => "AUTO_FIX",
            Self::MergeAfterReview => "MERGE_AFTER_REVIEW",
            Self::ManualReview => "MANUAL_REVIEW",
        }
    }
}

impl fmt::Display for ReviewRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing one codemod.
///
/// Built once when a codemod is constructed and never mutated; the registry
/// only hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    /// Globally unique codemod id (e.g. `remove-unnecessary-f-str`).
    pub id: String,
    /// One-line human summary.
    pub summary: String,
    /// Longer description of what the codemod changes.
    pub description: String,
    /// Review guidance for the produced edits.
    pub review_risk: ReviewRisk,
    /// Finding sources (rule files) whose findings gate this codemod.
    pub finding_source_refs: Vec<String>,
    /// Documentation URLs, emitted in the report.
    pub references: Vec<String>,
    /// Run on every file regardless of findings.
    pub always_eligible: bool,
}

impl RuleDescriptor {
    /// Descriptor with the required fields; the rest default to empty/false.
    pub fn new(id: impl Into<String>, summary: impl Into<String>, review_risk: ReviewRisk) -> Self {
        let summary = summary.into();
        Self {
            id: id.into(),
            description: summary.clone(),
            summary,
            review_risk,
            finding_source_refs: Vec::new(),
            references: Vec::new(),
            always_eligible: false,
        }
    }

    /// Set the long description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a finding source reference.
    #[must_use]
    pub fn with_finding_source(mut self, source: impl Into<String>) -> Self {
        self.finding_source_refs.push(source.into());
        self
    }

    /// Add a documentation reference.
    #[must_use]
    pub fn with_reference(mut self, url: impl Into<String>) -> Self {
        self.references.push(url.into());
        self
    }

    /// Declare the codemod eligible for every file, findings or not.
    #[must_use]
    pub fn always_eligible(mut self) -> Self {
        self.always_eligible = true;
        self
    }

    /// Whether a finding's rule reference points at this codemod.
    #[must_use]
    pub fn accepts_rule_ref(&self, rule_ref: &str) -> bool {
        rule_ref == self.id || self.finding_source_refs.iter().any(|s| s == rule_ref)
    }
}
