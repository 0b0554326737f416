//! Synchronous source file I/O.

use std::fs as std_fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Default per-file size limit (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Read a source file with size and binary checks.
///
/// # Errors
/// Returns `IoError::NotFound` when the file cannot be inspected,
/// `IoError::TooLarge` when it exceeds `max_bytes`, and decoding errors from
/// [`decode_buffer`].
pub fn read_source<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Write rewritten source back to disk.
///
/// # Errors
/// Returns `IoError::System` when the write fails.
pub fn write_source<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    std_fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote source file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_read() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("module.py");
        std_fs::write(&p, "x = 1\n").unwrap();
        assert_eq!(read_source(&p, 1024).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_file_too_large() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("large.py");
        std_fs::write(&p, "12345678901234567890").unwrap();
        assert!(matches!(read_source(&p, 10), Err(IoError::TooLarge(20, 10))));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_source("/nonexistent/file.py", 1024);
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
