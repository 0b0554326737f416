//! Re-exports from ast-grep (Unified ast-grep v0.40.5)
//!
//! Keeps every crate in the workspace on the same ast-grep version.

// Core pattern matching
pub use ast_grep_core::Doc;
pub use ast_grep_core::Language as AstLanguage;
pub use ast_grep_core::Pattern;
pub use ast_grep_core::matcher::MatcherExt;
pub use ast_grep_core::matcher::NodeMatch;

// Language support
pub use ast_grep_language::LanguageExt;
pub use ast_grep_language::SupportLang;

// Meta variable handling
pub use ast_grep_core::meta_var::MetaVarEnv;
pub use ast_grep_core::meta_var::MetaVariable;
