//! Error types for parsing and pattern compilation.

use thiserror::Error;

/// Errors raised while building a syntax tree or a search pattern.
#[derive(Error, Debug)]
pub enum AstError {
    /// The Python grammar could not be loaded into the parser.
    #[error("Failed to load Python grammar: {0}")]
    Grammar(String),

    /// The parser produced no tree at all.
    #[error("Parser returned no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("Syntax error at line {line}, column {column}")]
    Syntax {
        /// 1-indexed line of the first error node.
        line: usize,
        /// 1-indexed column of the first error node.
        column: usize,
    },

    /// Invalid ast-grep pattern syntax.
    #[error("Pattern error: {0}")]
    Pattern(String),
}
