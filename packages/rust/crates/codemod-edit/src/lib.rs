#![allow(clippy::doc_markdown)]

//! codemod-edit - Source rewriting primitives for codemods
//!
//! # Features
//!
//! - **Splicing**: Apply non-overlapping byte-range edits in one pass
//! - **Structural Replace**: ast-grep pattern rewrite with a per-match gate
//! - **Capture Substitution**: Use `$NAME` and `$$$NAME` placeholders
//! - **Diff Output**: Unified diffs of pre-image vs post-image
//!
//! # Architecture
//!
//! ```text
//! codemod-edit/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # EditError enum (thiserror)
//! ├── types.rs    # TextEdit, EditLocation, EditResult
//! ├── splice.rs   # Byte-range edit application
//! ├── diff.rs     # Unified diff generation
//! ├── capture.rs  # Variable capture substitution
//! └── editor.rs   # StructuralEditor implementation
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use codemod_edit::StructuralEditor;
//!
//! let result = StructuralEditor::replace_where(
//!     "line = f.readline()\n",
//!     "$F.readline()",
//!     "$F.readline(5_000_000)",
//!     |edit| edit.line == 1,
//! )?;
//! assert_eq!(result.modified, "line = f.readline(5_000_000)\n");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod capture;
mod diff;
mod editor;
mod error;
mod splice;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use diff::generate_unified_diff;
pub use editor::StructuralEditor;
pub use error::EditError;
pub use splice::apply_edits;
pub use types::{EditLocation, EditResult, TextEdit};
