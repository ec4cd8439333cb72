use crate::PatchError;

use super::parser::parse_unified_diff;
use super::types::{ApplyOptions, Hunk};

/// Parses `diff_text` and applies it to `original` with default options.
pub fn apply_unified_diff(original: &str, diff_text: &str) -> Result<String, PatchError> {
    let hunks = parse_unified_diff(diff_text)?;
    apply_hunks(original, &hunks, &ApplyOptions::default())
}

/// Applies hunks to `original` by content resynchronization.
///
/// Instead of trusting a hunk's declared start line, a cursor scans forward
/// through the untouched original lines until it reaches the hunk's first
/// body line (prefix stripped). The scan is bounded by the remaining length
/// of the original; an anchor that never appears is a
/// [`PatchError::ResyncTargetNotFound`], and nothing is written in that case.
///
/// Lines are split and rejoined on a single `\n`, so a trailing newline in
/// `original` survives as a trailing empty line.
pub fn apply_hunks(
    original: &str,
    hunks: &[Hunk],
    options: &ApplyOptions,
) -> Result<String, PatchError> {
    let original_lines: Vec<&str> = original.split('\n').collect();
    let mut output: Vec<String> = Vec::with_capacity(original_lines.len());
    let mut cursor = 0usize;

    for hunk in hunks {
        let Some(first) = hunk.lines.first() else {
            continue;
        };
        let anchor = strip_line_prefix(first);

        while cursor < original_lines.len() && original_lines[cursor] != anchor {
            let passed = original_lines[cursor];
            let duplicate = options.collapse_resync_duplicates
                && output.last().is_some_and(|last| last == passed);
            if !duplicate {
                output.push(passed.to_string());
            }
            cursor += 1;
        }
        if cursor >= original_lines.len() {
            return Err(PatchError::ResyncTargetNotFound {
                anchor: anchor.to_string(),
            });
        }

        let last_index = hunk.lines.len() - 1;
        for (index, raw) in hunk.lines.iter().enumerate() {
            if let Some(added) = raw.strip_prefix('+') {
                output.push(added.to_string());
            } else if raw.starts_with('-') {
                cursor = advance(cursor, original_lines.len());
            } else if let Some(context) = raw.strip_prefix(' ') {
                output.push(context.to_string());
                cursor = advance(cursor, original_lines.len());
            } else if raw.is_empty() {
                // An empty body line in the middle of a hunk is an empty
                // context line; at the very end it is padding left behind by
                // the diff text's final newline and carries no content.
                if index != last_index {
                    output.push(String::new());
                    cursor = advance(cursor, original_lines.len());
                }
            } else {
                return Err(PatchError::InvalidHunkLine { text: raw.clone() });
            }
        }
    }

    output.extend(original_lines[cursor..].iter().map(|line| line.to_string()));
    Ok(output.join("\n"))
}

fn strip_line_prefix(line: &str) -> &str {
    match line.as_bytes().first() {
        Some(b'+') | Some(b'-') | Some(b' ') => &line[1..],
        _ => line,
    }
}

fn advance(cursor: usize, limit: usize) -> usize {
    (cursor + 1).min(limit)
}
