//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use codemod_core::{CodemodSettings, split_patterns};

/// `codemod` arguments.
#[derive(Debug, Parser)]
#[command(name = "codemod")]
#[command(about = "Apply rule-based codemods to a Python project and report every change.")]
pub struct Cli {
    /// Project root to transform.
    #[arg(required_unless_present = "list")]
    pub directory: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Compute changes and the report without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Comma-separated codemod ids to run (default: all).
    #[arg(long)]
    pub codemod_include: Option<String>,

    /// Comma-separated codemod ids to skip.
    #[arg(long)]
    pub codemod_exclude: Option<String>,

    /// Comma-separated file globs to include (default: *.py).
    #[arg(long)]
    pub path_include: Option<String>,

    /// Comma-separated file globs to exclude.
    #[arg(long)]
    pub path_exclude: Option<String>,

    /// JSON file of semantic findings.
    #[arg(long)]
    pub findings: Option<PathBuf>,

    /// Only edit these lines of a file: PATH:SPEC, e.g. app/io.py:3,7-9
    #[arg(long = "line-include", value_name = "PATH:SPEC")]
    pub line_include: Vec<String>,

    /// Never edit these lines of a file: PATH:SPEC
    #[arg(long = "line-exclude", value_name = "PATH:SPEC")]
    pub line_exclude: Vec<String>,

    /// Settings file (default: <directory>/.codemod.yaml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads (default: one per core).
    #[arg(long)]
    pub workers: Option<usize>,

    /// List available codemods and exit.
    #[arg(long)]
    pub list: bool,

    /// Debug logging on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Settings given on the command line, to be layered over the file.
    #[must_use]
    pub fn settings_overlay(&self) -> CodemodSettings {
        CodemodSettings {
            path_include: self.path_include.as_deref().map(split_patterns),
            path_exclude: self.path_exclude.as_deref().map(split_patterns),
            codemod_include: self.codemod_include.as_deref().map(split_patterns),
            codemod_exclude: self.codemod_exclude.as_deref().map(split_patterns),
            dry_run: self.dry_run.then_some(true),
            workers: self.workers,
            max_file_size: None,
            line_filters: None,
        }
    }
}
