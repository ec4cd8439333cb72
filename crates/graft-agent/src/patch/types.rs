/// One contiguous edit region of a unified diff.
///
/// The declared ranges are informational only: AI-generated diffs frequently
/// miscount context, so the applier resynchronizes on content instead of
/// trusting them. A hunk is consumed by a single apply pass and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hunk {
    /// Zero-based line index into the original content, as declared.
    pub original_start: usize,
    /// Number of original lines the hunk claims to span.
    pub original_count: usize,
    /// Zero-based line index into the produced content, as declared.
    pub new_start: usize,
    /// Number of produced lines the hunk claims to span.
    pub new_count: usize,
    /// Raw body lines, each still carrying its `+`/`-`/space prefix
    /// (or no prefix for an empty line).
    pub lines: Vec<String>,
}

/// Policy knobs for hunk application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOptions {
    /// During resync, skip an original line instead of copying it when it is
    /// identical to the line most recently written to the output. This
    /// absorbs duplicated merge artifacts in model output, at the cost of
    /// collapsing legitimately repeated lines (e.g. consecutive blanks)
    /// while scanning toward an anchor.
    pub collapse_resync_duplicates: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            collapse_resync_duplicates: true,
        }
    }
}
