#![allow(clippy::doc_markdown)]

//! codemod-core - Rule-based codemod orchestration
//!
//! Discovers files, decides per file which codemods apply (gated by semantic
//! findings and line filters), applies them in parallel, and compiles one
//! deterministic report with per-file diffs.
//!
//! # Architecture
//!
//! ```text
//! codemod-core/src/
//! ├── lib.rs            # Re-exports (this file)
//! ├── error.rs          # Error enums (thiserror)
//! ├── selector.rs       # FileSelector: include/exclude globs
//! ├── descriptor.rs     # RuleDescriptor, ReviewRisk
//! ├── registry.rs       # CodemodRegistry
//! ├── line_filter.rs    # LineFilter, LineFilterSpec
//! ├── findings.rs       # SemanticFinding, FindingIndex
//! ├── change.rs         # Change, ChangeSet
//! ├── codemod.rs        # Codemod trait, FileContext, TransformOutput
//! ├── context.rs        # ExecutionContext (DashMap-backed)
//! ├── report.rs         # Report compilation
//! ├── executor.rs       # CodemodExecutor (rayon)
//! ├── settings.rs       # CodemodSettings (YAML)
//! ├── engine.rs         # run(): configuration in, report out
//! ├── project/          # Manifest parsers
//! └── codemods/         # Built-in codemods
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use codemod_core::{CancellationFlag, RunConfig, default_registry, run};
//!
//! let registry = Arc::new(default_registry()?);
//! let config = RunConfig::new("./project").dry_run(true);
//! let outcome = run(registry, &config, CancellationFlag::new())?;
//! println!("{}", outcome.report.to_json_pretty()?);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod change;
mod codemod;
pub mod codemods;
mod context;
mod descriptor;
mod engine;
mod error;
mod executor;
mod findings;
mod line_filter;
pub mod project;
mod registry;
mod report;
mod selector;
mod settings;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use change::{Change, ChangeSet};
pub use codemod::{Codemod, FileContext, TransformOutput, should_transform};
pub use codemods::{builtin_codemods, default_registry};
pub use context::ExecutionContext;
pub use descriptor::{ReviewRisk, RuleDescriptor};
pub use engine::{RunConfig, RunOutcome, run};
pub use error::{
    CodemodError, EngineError, FindingsError, LineSpecError, RegistryError, SelectorError,
    SettingsError,
};
pub use executor::{CancellationFlag, CodemodExecutor, RunOptions, RunStats};
pub use findings::{FindingIndex, SemanticFinding, load_findings, parse_findings};
pub use line_filter::{LineFilter, LineFilterSpec, LineRanges, LineSet, parse_line_spec};
pub use project::{FileType, PackageStore, ProjectAnalyzer};
pub use registry::CodemodRegistry;
pub use report::{CodemodReport, Report, RunSummary, compile_report, compile_results};
pub use selector::{DEFAULT_INCLUDE, FileSelector, Selection, relative_path, split_patterns};
pub use settings::{CodemodSettings, DEFAULT_SETTINGS_FILE, LineFilterSettings, default_settings_path};

/// Re-exported so custom codemods need no direct dependency on codemod-ast.
pub use codemod_ast::SourceTree;
