//! Lexical screening of raw query text.
//!
//! A heuristic filter, not a parser: it has known false positives (a
//! legitimate query containing a literal semicolon) and false negatives
//! (any injection avoiding these exact substrings).

use once_cell::sync::Lazy;
use regex::Regex;

/// Suspicious patterns checked against every incoming query.
/// All patterns are compile-time constants, so expect() is safe here.
static SUSPICIOUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)UNION\s+SELECT").expect("Invalid regex: UNION SELECT pattern"),
        Regex::new(r"(?i)DROP\s+TABLE").expect("Invalid regex: DROP TABLE pattern"),
        Regex::new(r"--").expect("Invalid regex: line comment pattern"),
        Regex::new(r";").expect("Invalid regex: statement terminator pattern"),
    ]
});

/// Pattern-based injection detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if any suspicious pattern matches anywhere in the text.
    ///
    /// Pure and stateless; the admission decision and its audit trail are
    /// the caller's concern.
    pub fn is_suspicious(&self, text: &str) -> bool {
        SUSPICIOUS_PATTERNS.iter().any(|p| p.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_select() {
        let detector = PatternDetector::new();
        assert!(detector.is_suspicious("SELECT a FROM t UNION SELECT b FROM passwords"));
        assert!(detector.is_suspicious("union select 1"));
        assert!(detector.is_suspicious("UnIoN   SeLeCt secret"));
        assert!(detector.is_suspicious("UNION\t\nSELECT 1"));
    }

    #[test]
    fn test_drop_table() {
        let detector = PatternDetector::new();
        assert!(detector.is_suspicious("DROP TABLE users"));
        assert!(detector.is_suspicious("drop   table users"));
    }

    #[test]
    fn test_comment_marker() {
        let detector = PatternDetector::new();
        assert!(detector.is_suspicious("SELECT * FROM users WHERE id = 1 --"));
        assert!(detector.is_suspicious("-- leading comment"));
    }

    #[test]
    fn test_statement_terminator() {
        let detector = PatternDetector::new();
        assert!(detector.is_suspicious("SELECT 1;"));
        assert!(detector.is_suspicious("; DROP anything"));
    }

    #[test]
    fn test_benign_queries_pass() {
        let detector = PatternDetector::new();
        assert!(!detector.is_suspicious("SELECT id, name FROM users WHERE id = 1"));
        assert!(!detector.is_suspicious("SELECT * FROM unions"));
        assert!(!detector.is_suspicious(""));
    }

    #[test]
    fn test_false_positive_is_expected() {
        // The detector is lexical: a harmless trailing semicolon trips it.
        let detector = PatternDetector::new();
        assert!(detector.is_suspicious("SELECT 1;"));
    }
}
