/// Immutable configuration tables for the omission heuristic.
///
/// The defaults are language-agnostic; hosts can inject tuned tables for a
/// specific language or project without touching the detector itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OmissionVocabulary {
    /// Syntactic prefixes that classify a trimmed line as a comment.
    pub comment_prefixes: Vec<String>,
    /// Phrases that suggest summarized-away code when a comment contains
    /// them, matched case-insensitively on the trimmed line.
    pub omission_phrases: Vec<String>,
    /// Case-insensitive regexes for an ellipsis wrapped in comment or
    /// parenthesis syntax. Matches are reported unconditionally.
    pub suspicious_patterns: Vec<String>,
}

impl Default for OmissionVocabulary {
    fn default() -> Self {
        Self {
            comment_prefixes: to_strings(&[
                "//", "#", "/*", "*", "*/", "{/*", "<!--", "--", ";", "%", "///",
            ]),
            omission_phrases: to_strings(&[
                "remain",
                "remains",
                "unchanged",
                "rest",
                "previous",
                "existing",
                "...",
                "placeholder implementation",
                "previous implementation",
                "rest of",
                "same as before",
                "as above",
                "similar to",
                "etc",
                "and so on",
            ]),
            suspicious_patterns: to_strings(&[
                r"/\*\s*\.\.\.\s*\*/",
                r"//\s*\.\.\.",
                r"#\s*\.\.\.",
                r"<!--\s*\.\.\.\s*-->",
                r"\(\s*\.\.\.\s*\)",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
