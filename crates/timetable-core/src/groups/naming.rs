//! Pattern rules over group names.
//!
//! These are empirically tuned conventions, not a grammar. Every function
//! here is total: any input gets an answer.

use std::sync::LazyLock;

use regex::Regex;

static RE_TWO_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]\.[0-9]").expect("valid two-level regex"));
static RE_LETTER_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]?$").expect("valid letter group regex"));
static RE_G_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^G[0-9]$").expect("valid G group regex"));
static RE_DOT_NUMBER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[0-9]+$").expect("valid dot suffix regex"));
static RE_TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+$").expect("valid trailing digits regex"));
static RE_DOUBLE_NUMBER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+$").expect("valid double suffix regex"));
static RE_NUMERIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.0-9]+$").expect("valid numeric suffix regex"));

/// Number of digit and dot characters; deeper groups score higher
pub fn complexity(name: &str) -> usize {
    name.chars().filter(|c| *c == '.' || c.is_ascii_digit()).count()
}

/// Dotted ("DV1.1") or two-level numeric names
pub fn is_dotted(name: &str) -> bool {
    name.contains('.') || RE_TWO_LEVEL.is_match(name)
}

/// A single capital with at most one digit ("A", "B2"), or "G<digit>"
pub fn is_letter_group(name: &str) -> bool {
    RE_LETTER_GROUP.is_match(name) || RE_G_GROUP.is_match(name)
}

/// Possible parent names, most specific rule first:
/// up to the last dot, without ".<digits>", without trailing digits,
/// without "<digits>.<digits>". Empty results and the name itself are
/// dropped.
pub fn parent_candidates(name: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(4);
    if let Some(idx) = name.rfind('.') {
        candidates.push(name[..idx].to_string());
    }
    candidates.push(RE_DOT_NUMBER_SUFFIX.replace(name, "").into_owned());
    candidates.push(RE_TRAILING_DIGITS.replace(name, "").into_owned());
    candidates.push(RE_DOUBLE_NUMBER_SUFFIX.replace(name, "").into_owned());
    candidates.retain(|p| !p.is_empty() && p != name);
    candidates
}

/// "A1" -> "A", "DV1.1" -> "DV1" (a dot left dangling is dropped too)
pub fn strip_trailing_digits(name: &str) -> String {
    let stripped = RE_TRAILING_DIGITS.replace(name, "");
    stripped.strip_suffix('.').unwrap_or(&*stripped).to_string()
}

/// Everything before the first digit: "DV1.1" -> "DV"
pub fn strip_from_first_digit(name: &str) -> &str {
    name.find(|c: char| c.is_ascii_digit())
        .map(|idx| &name[..idx])
        .unwrap_or(name)
}

/// Name without its trailing run of digits and dots: "DV1.1" -> "DV"
pub fn strip_numeric_suffix(name: &str) -> String {
    RE_NUMERIC_SUFFIX.replace(name, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity() {
        assert_eq!(complexity("DV"), 0);
        assert_eq!(complexity("DV1"), 1);
        assert_eq!(complexity("DV1.1"), 3);
        assert_eq!(complexity("G12"), 2);
    }

    #[test]
    fn test_patterns() {
        assert!(is_dotted("DV1.1"));
        assert!(is_dotted("A."));
        assert!(!is_dotted("DV1"));
        assert!(is_letter_group("A"));
        assert!(is_letter_group("B2"));
        assert!(is_letter_group("G1"));
        assert!(!is_letter_group("G12"));
        assert!(!is_letter_group("DV1"));
        assert!(!is_letter_group("a1"));
    }

    #[test]
    fn test_parent_candidates_priority() {
        assert_eq!(parent_candidates("DV1.1"), vec!["DV1", "DV1", "DV1.", "DV"]);
        assert_eq!(parent_candidates("A1"), vec!["A"]);
        assert_eq!(parent_candidates("DV1"), vec!["DV"]);
        assert!(parent_candidates("DV").is_empty());
        assert!(parent_candidates("12").is_empty());
    }

    #[test]
    fn test_parent_candidates_multiple_numeric_runs() {
        assert_eq!(parent_candidates("A1.2.3"), vec!["A1.2", "A1.2", "A1.2.", "A1."]);
    }

    #[test]
    fn test_strip_helpers() {
        assert_eq!(strip_trailing_digits("A1"), "A");
        assert_eq!(strip_trailing_digits("DV1.1"), "DV1");
        assert_eq!(strip_trailing_digits("TD"), "TD");
        assert_eq!(strip_from_first_digit("DV1.1"), "DV");
        assert_eq!(strip_from_first_digit("G2"), "G");
        assert_eq!(strip_from_first_digit("TP"), "TP");
        assert_eq!(strip_numeric_suffix("DV1.1"), "DV");
        assert_eq!(strip_numeric_suffix("A1"), "A");
        assert_eq!(strip_numeric_suffix("A"), "A");
    }
}
