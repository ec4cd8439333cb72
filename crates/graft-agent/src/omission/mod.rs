mod vocabulary;

pub use vocabulary::OmissionVocabulary;

use crate::ToolError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single advisory marker found in candidate content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The offending candidate line, verbatim.
    pub line: String,
    /// The phrase or pattern label that triggered the finding.
    pub keyword: String,
    /// 1-based position within the candidate content.
    pub line_number: usize,
}

/// Verdict of one detection run. Advisory only: a positive report is merged
/// into a successful write result, never turned into a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmissionReport {
    pub has_omission: bool,
    pub findings: Vec<Finding>,
}

/// Best-effort scanner for signs that the AI truncated or summarized code
/// instead of reproducing it in full.
#[derive(Debug)]
pub struct OmissionDetector {
    vocabulary: OmissionVocabulary,
    suspicious: Vec<Regex>,
}

impl OmissionDetector {
    /// Compiles the vocabulary's suspicious patterns. Fails only on an
    /// invalid injected pattern; the defaults are covered by unit tests.
    pub fn new(vocabulary: OmissionVocabulary) -> Result<Self, ToolError> {
        let mut suspicious = Vec::with_capacity(vocabulary.suspicious_patterns.len());
        for pattern in &vocabulary.suspicious_patterns {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|error| {
                    ToolError::Validation(format!(
                        "invalid suspicious pattern '{}': {}",
                        pattern, error
                    ))
                })?;
            suspicious.push(regex);
        }
        Ok(Self {
            vocabulary,
            suspicious,
        })
    }

    /// Scans `candidate` for omission markers, suppressing comment-keyword
    /// and ellipsis findings that were already present in `original`.
    ///
    /// Pure and deterministic: identical inputs yield identical reports.
    /// A line may be reported by more than one pass.
    pub fn detect(&self, original: &str, candidate: &str) -> OmissionReport {
        let original_trimmed: HashSet<String> = original
            .split('\n')
            .map(|line| line.trim().to_lowercase())
            .collect();
        let original_has_ellipsis = original.contains("...");

        let mut findings = Vec::new();
        for (index, line) in candidate.split('\n').enumerate() {
            let line_number = index + 1;
            let normalized = line.trim().to_lowercase();

            // Pass 1: omission phrases inside comment lines, unless the
            // exact comment was carried over from the original.
            if self.is_comment_line(line) && !original_trimmed.contains(&normalized) {
                if let Some(phrase) = self
                    .vocabulary
                    .omission_phrases
                    .iter()
                    .find(|phrase| normalized.contains(phrase.as_str()))
                {
                    findings.push(Finding {
                        line: line.to_string(),
                        keyword: phrase.clone(),
                        line_number,
                    });
                }
            }

            // Pass 2: a literal ellipsis anywhere, unless the original
            // already contained one.
            if line.contains("...") && !original_has_ellipsis {
                findings.push(Finding {
                    line: line.to_string(),
                    keyword: "...".to_string(),
                    line_number,
                });
            }

            // Pass 3: ellipsis wrapped in comment/parenthesis syntax,
            // reported unconditionally.
            if self.suspicious.iter().any(|regex| regex.is_match(line)) {
                findings.push(Finding {
                    line: line.to_string(),
                    keyword: "suspicious pattern".to_string(),
                    line_number,
                });
            }
        }

        OmissionReport {
            has_omission: !findings.is_empty(),
            findings,
        }
    }

    pub fn vocabulary(&self) -> &OmissionVocabulary {
        &self.vocabulary
    }

    fn is_comment_line(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.vocabulary
            .comment_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix.as_str()))
    }
}

/// First line of the advisory block tools append to their success message.
pub const OMISSION_WARNING_HEADER: &str =
    "WARNING: the generated content may omit code from the original file:";

/// Renders a report as the advisory block tools append to their success
/// message. Returns `None` when there is nothing to report.
pub fn format_omission_warning(report: &OmissionReport) -> Option<String> {
    if !report.has_omission {
        return None;
    }
    let mut warning = String::from(OMISSION_WARNING_HEADER);
    for finding in &report.findings {
        warning.push_str(&format!(
            "\n  line {} [{}]: {}",
            finding.line_number,
            finding.keyword,
            finding.line.trim()
        ));
    }
    Some(warning)
}

#[cfg(test)]
mod tests {
    use super::{OmissionDetector, OmissionVocabulary, format_omission_warning};
    use crate::ToolError;

    fn detector() -> OmissionDetector {
        OmissionDetector::new(OmissionVocabulary::default())
            .expect("default vocabulary should compile")
    }

    #[test]
    fn detect_flags_omission_comment_in_new_content() {
        let original = "function f() {\n  return 1\n}";
        let candidate = "function f() {\n  // rest of implementation unchanged\n}";
        let report = detector().detect(original, candidate);
        assert!(report.has_omission);
        let keywords: Vec<&str> = report
            .findings
            .iter()
            .map(|finding| finding.keyword.as_str())
            .collect();
        assert!(
            keywords
                .iter()
                .any(|keyword| ["rest", "unchanged", "rest of"].contains(keyword))
        );
        assert_eq!(report.findings[0].line_number, 2);
    }

    #[test]
    fn detect_reports_first_matching_phrase_once_per_line() {
        let report = detector().detect("", "// rest of the previous unchanged code\nbody()");
        let pass_one: Vec<_> = report
            .findings
            .iter()
            .filter(|finding| finding.keyword != "suspicious pattern" && finding.keyword != "...")
            .collect();
        assert_eq!(pass_one.len(), 1);
    }

    #[test]
    fn detect_suppresses_comment_carried_over_from_original() {
        let comment = "  // existing helpers remain below";
        let original = format!("fn a() {{}}\n{}\nfn b() {{}}", comment);
        let candidate = format!("fn a() {{}}\n{}\nfn b() {{ todo() }}", comment);
        let report = detector().detect(&original, &candidate);
        assert!(!report.has_omission, "carried-over comment must not flag");
    }

    #[test]
    fn detect_suppression_is_case_insensitive() {
        let original = "// Existing helpers REMAIN below\nfn a() {}";
        let candidate = "// existing helpers remain below\nfn a() {}";
        let report = detector().detect(original, candidate);
        assert!(!report.has_omission);
    }

    #[test]
    fn detect_flags_ellipsis_absent_from_original() {
        let report = detector().detect("let x = 1;", "let x = 1;\nrange(0, 10)...");
        assert!(report.has_omission);
        assert_eq!(report.findings[0].keyword, "...");
        assert_eq!(report.findings[0].line_number, 2);
    }

    #[test]
    fn detect_suppresses_ellipsis_present_in_original() {
        let report = detector().detect("match x { _ => ... }", "match x { _ => ... }\nextra()");
        let ellipsis: Vec<_> = report
            .findings
            .iter()
            .filter(|finding| finding.keyword == "...")
            .collect();
        assert!(ellipsis.is_empty());
    }

    #[test]
    fn detect_reports_comment_ellipsis_from_multiple_passes() {
        let report = detector().detect("fn a() {}", "fn a() {}\n// ...");
        assert!(report.has_omission);
        let keywords: Vec<&str> = report
            .findings
            .iter()
            .map(|finding| finding.keyword.as_str())
            .collect();
        assert!(keywords.contains(&"..."));
        assert!(keywords.contains(&"suspicious pattern"));
    }

    #[test]
    fn detect_reports_suspicious_pattern_even_when_present_in_original() {
        // Pass 3 has no original-content suppression.
        let report = detector().detect("/* ... */", "/* ... */");
        let suspicious: Vec<_> = report
            .findings
            .iter()
            .filter(|finding| finding.keyword == "suspicious pattern")
            .collect();
        assert_eq!(suspicious.len(), 1);
    }

    #[test]
    fn detect_matches_suspicious_patterns_case_insensitively_with_padding() {
        let report = detector().detect("", "<!--   ...   -->");
        assert!(report.has_omission);
    }

    #[test]
    fn detect_ignores_clean_content() {
        let original = "fn main() {\n    println!(\"hi\");\n}";
        let candidate = "fn main() {\n    println!(\"hello\");\n}";
        let report = detector().detect(original, candidate);
        assert!(!report.has_omission);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn detect_is_idempotent() {
        let original = "fn f() {}";
        let candidate = "fn f() {}\n# rest omitted";
        let first = detector().detect(original, candidate);
        let second = detector().detect(original, candidate);
        assert_eq!(first, second);
    }

    #[test]
    fn detect_uses_injected_vocabulary() {
        let vocabulary = OmissionVocabulary {
            comment_prefixes: vec!["--".to_string()],
            omission_phrases: vec!["snip".to_string()],
            suspicious_patterns: Vec::new(),
        };
        let detector =
            OmissionDetector::new(vocabulary).expect("custom vocabulary should compile");
        let report = detector.detect("", "-- snip\n// rest unchanged");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].keyword, "snip");
    }

    #[test]
    fn new_rejects_invalid_suspicious_pattern() {
        let vocabulary = OmissionVocabulary {
            suspicious_patterns: vec!["(unclosed".to_string()],
            ..OmissionVocabulary::default()
        };
        let err = OmissionDetector::new(vocabulary).expect_err("bad regex should be rejected");
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn format_omission_warning_lists_findings() {
        let report = detector().detect("fn f() {}", "fn f() {}\n// rest unchanged");
        let warning = format_omission_warning(&report).expect("report should render");
        assert!(warning.contains("line 2"));
        assert!(warning.contains("rest unchanged"));
    }

    #[test]
    fn format_omission_warning_empty_for_clean_report() {
        let report = detector().detect("a", "a");
        assert!(format_omission_warning(&report).is_none());
    }
}
