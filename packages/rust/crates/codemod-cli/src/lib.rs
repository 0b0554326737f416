//! codemod-cli - command-line front end for codemod-core.
//!
//! ```text
//! codemod-cli/src/
//! ├── main.rs   # tokio entry point, logging, Ctrl+C
//! ├── lib.rs    # Re-exports (this file)
//! ├── cli.rs    # clap arguments
//! └── app.rs    # config resolution, run, report output
//! ```

mod app;
mod cli;

pub use app::{Outcome, emit_report, execute, list_codemods, resolve_config};
pub use cli::Cli;
