//! Binary detection and decoding utilities.

use memchr::memchr;

use crate::error::IoError;

/// Quick binary detection - checks first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes to a `String`.
///
/// Unlike a lossy decode, invalid UTF-8 is rejected: a rewritten file is
/// written back verbatim, so replacement characters would corrupt it.
///
/// # Errors
/// Returns `IoError::BinaryFile` for binary content and `IoError::Encoding`
/// for invalid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|_| IoError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_not_binary() {
        assert!(!is_binary(b"x = 1\n"));
        assert!(is_binary(b"\x00\x01"));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = decode_buffer(vec![b'a', 0xff, b'b']);
        assert!(matches!(result, Err(IoError::Encoding)));
    }
}
