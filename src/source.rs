//! Source slices — the dedented text of a method shown next to its docs.

use crate::error::{KodocError, Result};
use std::fs;
use std::path::Path;

/// Lines `start..=end` (1-indexed) of `path`, dedented by the indentation
/// of the first line.
///
/// The same number of characters is cut from every line, so mixed
/// indentation inside the range is not re-measured.
pub fn extract(path: &Path, start: usize, end: usize) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(KodocError::NoFile);
    }
    let content = fs::read_to_string(path).map_err(|e| KodocError::io(path, e))?;
    Ok(slice(&content, start, end))
}

/// Dedented slice of already-loaded text. Out-of-range requests yield "".
pub fn slice(content: &str, start: usize, end: usize) -> String {
    let skip = start.saturating_sub(1);
    let take = (end + 1).saturating_sub(start.max(1));
    let lines: Vec<&str> = content.lines().skip(skip).take(take).collect();

    let Some(first) = lines.first() else {
        return String::new();
    };
    let padding = first.chars().take_while(|c| c.is_whitespace()).count();

    lines
        .iter()
        .map(|line| strip_chars(line, padding))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop up to `n` leading characters.
fn strip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((i, _)) => &line[i..],
        None => "",
    }
}
