//! codemod-ast - Python syntax trees for the codemod engine
//!
//! Provides the parsed-file representation every codemod receives
//! (`SourceTree`, backed by tree-sitter) and ast-grep pattern compilation
//! for pattern-driven codemods.
//!
//! ## Architecture
//!
//! ```text
//! codemod-ast/src/
//! ├── lib.rs           # Re-exports (entry point)
//! ├── re_exports.rs    # ast-grep re-exports
//! ├── error.rs         # AstError enum
//! ├── tree.rs          # SourceTree and preorder traversal
//! ├── scan.rs          # Pattern compilation, offsets
//! └── python.rs        # Python node helpers
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use codemod_ast::SourceTree;
//!
//! let tree = SourceTree::parse("bad = f\"hello\"\n")?;
//! for node in tree.preorder() {
//!     println!("{} at line {}", node.kind(), SourceTree::line_of(node));
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod python;
mod re_exports;
mod scan;
mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use re_exports::*;

pub use error::AstError;
pub use python::{assignment_parts, string_has_interpolation, string_prefix};
pub use scan::{line_at_offset, pattern};
pub use tree::{Preorder, SourceTree};

/// tree-sitter node type, re-exported so codemods need no direct dependency.
pub use tree_sitter::Node;
