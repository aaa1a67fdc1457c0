//! Block comment toggling
//!
//! Wraps a range of lines in the mode's comment markers, or strips them
//! when the range is already wrapped.

use crate::syntax::BbcodeMode;

/// Whether `lines` start with the opening marker and end with the closing one
pub fn is_commented<S: AsRef<str>>(mode: &BbcodeMode, lines: &[S]) -> bool {
    let (start, end) = mode.block_comment();
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => {
            first.as_ref().trim_start().starts_with(start) && last.as_ref().trim_end().ends_with(end)
        }
        _ => false,
    }
}

/// Comment out `lines`, or uncomment them if they already are.
pub fn toggle_block_comment<S: AsRef<str>>(mode: &BbcodeMode, lines: &[S]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }
    if is_commented(mode, lines) {
        uncomment(mode, lines)
    } else {
        comment(mode, lines)
    }
}

fn comment<S: AsRef<str>>(mode: &BbcodeMode, lines: &[S]) -> Vec<String> {
    let (start, end) = mode.block_comment();
    let mut out: Vec<String> = lines.iter().map(|line| line.as_ref().to_string()).collect();
    let last = out.len() - 1;
    out[0].insert_str(0, start);
    out[last].push_str(end);
    out
}

fn uncomment<S: AsRef<str>>(mode: &BbcodeMode, lines: &[S]) -> Vec<String> {
    let (start, end) = mode.block_comment();
    let mut out: Vec<String> = lines.iter().map(|line| line.as_ref().to_string()).collect();

    let first = &out[0];
    let indent = first.len() - first.trim_start().len();
    out[0].replace_range(indent..indent + start.len(), "");

    let last = out.len() - 1;
    let trimmed = out[last].trim_end().len();
    if out[last][..trimmed].ends_with(end) {
        out[last].replace_range(trimmed - end.len()..trimmed, "");
    }
    out
}
