//! Saved program file layout
//!
//! Saved files hold the original, commented source between marker comments,
//! followed by the filtered instruction stream inside a trailing comment:
//!
//! ```text
//! /* Brainfuck Program with Comments */
//! /* Saved from Brainfuck IDE */
//!
//! <original text>
//!
//! /* Filtered executable code: */
//! /* <filtered instructions> */
//! ```
//!
//! The trailer repeats every instruction, so it has to be removed before the
//! text is filtered again; [`unwrap`] does that. Files without markers pass
//! through [`unwrap`] unchanged.

use crate::parser::filter;

pub const HEADER_MARKER: &str = "/* Brainfuck Program with Comments */";
pub const SAVED_BY_MARKER: &str = "/* Saved from Brainfuck IDE */";
pub const TRAILER_MARKER: &str = "/* Filtered executable code: */";

/// Wrap `original` in the saved-file layout.
pub fn wrap(original: &str) -> String {
    format!(
        "{}\n{}\n\n{}\n\n{}\n/* {} */\n",
        HEADER_MARKER,
        SAVED_BY_MARKER,
        original,
        TRAILER_MARKER,
        filter(original)
    )
}

/// Recover the original text from a saved file.
pub fn unwrap(text: &str) -> String {
    let has_header = text.lines().next().is_some_and(|l| l.trim() == HEADER_MARKER);

    let mut lines: Vec<&str> = text.lines().collect();

    if let Some(pos) = lines.iter().rposition(|l| l.trim() == TRAILER_MARKER) {
        lines.truncate(pos);
    }

    if has_header {
        lines.remove(0);
        if lines.first().is_some_and(|l| l.trim() == SAVED_BY_MARKER) {
            lines.remove(0);
        }
        if lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
    }

    // wrap() put one blank line between the original text and the trailer
    if text.lines().any(|l| l.trim() == TRAILER_MARKER) && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
