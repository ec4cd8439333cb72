use crate::ParseError;

use super::types::Hunk;

/// Parses restricted unified-diff text into an ordered sequence of hunks.
///
/// A line matching `@@ -A[,B] +C[,D] @@` starts a hunk; every following line
/// is appended verbatim to its body until the next header, a `---`/`+++`
/// file-header line, or end of input. Lines outside any hunk (file headers,
/// prose preamble) are ignored. A line that begins with `@@` but does not
/// decode as a full header is a [`ParseError::InvalidHunkHeader`].
pub fn parse_unified_diff(diff_text: &str) -> Result<Vec<Hunk>, ParseError> {
    let mut hunks = Vec::new();
    let mut current: Option<(usize, Hunk)> = None;

    for (index, line) in diff_text.split('\n').enumerate() {
        let line_number = index + 1;

        if line.starts_with("@@") {
            let Some((original_start, original_count, new_start, new_count)) =
                parse_hunk_header(line)
            else {
                return Err(ParseError::InvalidHunkHeader {
                    line: line_number,
                    text: line.to_string(),
                });
            };
            finish_hunk(&mut hunks, current.take())?;
            current = Some((
                line_number,
                Hunk {
                    original_start: original_start.saturating_sub(1),
                    original_count,
                    new_start: new_start.saturating_sub(1),
                    new_count,
                    lines: Vec::new(),
                },
            ));
            continue;
        }

        if line.starts_with("---") || line.starts_with("+++") {
            finish_hunk(&mut hunks, current.take())?;
            continue;
        }

        if let Some((_, hunk)) = current.as_mut() {
            hunk.lines.push(line.to_string());
        }
    }

    finish_hunk(&mut hunks, current.take())?;
    Ok(hunks)
}

fn finish_hunk(hunks: &mut Vec<Hunk>, current: Option<(usize, Hunk)>) -> Result<(), ParseError> {
    let Some((header_line, hunk)) = current else {
        return Ok(());
    };
    if hunk.lines.is_empty() {
        return Err(ParseError::EmptyHunk { line: header_line });
    }
    hunks.push(hunk);
    Ok(())
}

/// Decodes `@@ -A[,B] +C[,D] @@`, returning the declared 1-based starts and
/// counts. Trailing section text after the closing `@@` is permitted.
fn parse_hunk_header(line: &str) -> Option<(usize, usize, usize, usize)> {
    let rest = line.strip_prefix("@@ -")?;
    let (original_start, original_count, rest) = parse_range(rest)?;
    let rest = rest.strip_prefix(" +")?;
    let (new_start, new_count, rest) = parse_range(rest)?;
    rest.strip_prefix(" @@")?;
    Some((original_start, original_count, new_start, new_count))
}

fn parse_range(input: &str) -> Option<(usize, usize, &str)> {
    let (start, rest) = parse_number(input)?;
    let Some(after_comma) = rest.strip_prefix(',') else {
        // Count defaults to 1 when omitted.
        return Some((start, 1, rest));
    };
    let (count, rest) = parse_number(after_comma)?;
    Some((start, count, rest))
}

fn parse_number(input: &str) -> Option<(usize, &str)> {
    let digits_end = input
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(input.len());
    if digits_end == 0 {
        return None;
    }
    let value = input[..digits_end].parse().ok()?;
    Some((value, &input[digits_end..]))
}
