#![allow(clippy::doc_markdown)]

//! codemod-io - Safe source file I/O for the codemod engine
//!
//! Reads source files with a size limit, binary detection and strict UTF-8
//! decoding, and writes rewritten sources back.
//!
//! # Architecture
//!
//! ```text
//! codemod-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! └── sync.rs     # Read / write API
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use codemod_io::{read_source, write_source, DEFAULT_MAX_FILE_SIZE};
//!
//! let content = read_source("settings.py", DEFAULT_MAX_FILE_SIZE)?;
//! write_source("settings.py", &content)?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod detect;
mod error;
mod sync;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use detect::{decode_buffer, is_binary};
pub use error::IoError;
pub use sync::{DEFAULT_MAX_FILE_SIZE, read_source, write_source};
