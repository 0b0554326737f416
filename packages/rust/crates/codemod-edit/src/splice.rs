//! Byte-range edit application.

use crate::error::EditError;
use crate::types::TextEdit;

/// Apply a set of non-overlapping edits to `source`.
///
/// Edits may be given in any order; they are applied back to front so that
/// earlier byte offsets stay valid.
///
/// # Errors
///
/// Returns `EditError::OutOfBounds` for ranges outside the source or not on
/// a character boundary, and `EditError::Overlap` when two edits intersect.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.start, e.end));

    for edit in &ordered {
        let valid = edit.start <= edit.end
            && edit.end <= source.len()
            && source.is_char_boundary(edit.start)
            && source.is_char_boundary(edit.end);
        if !valid {
            return Err(EditError::OutOfBounds {
                start: edit.start,
                end: edit.end,
                len: source.len(),
            });
        }
    }
    for pair in ordered.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(EditError::Overlap(pair[0].start, pair[1].start));
        }
    }

    let mut modified = source.to_string();
    for edit in ordered.iter().rev() {
        modified.replace_range(edit.start..edit.end, &edit.replacement);
    }
    Ok(modified)
}
