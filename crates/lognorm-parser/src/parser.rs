//! Recovery parser: ordered strategy chain over raw model output

use crate::lenient::repair_python_literal;
use crate::outcome::{ExtractionOutcome, FailureKind, StructuredRecord};
use crate::strategy::{default_strategies, scan_braces, BraceScan, CandidateStrategy};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Runs candidate strategies in order and keeps the first JSON object
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug)]
pub struct RecoveryParser {
    strategies: Vec<Box<dyn CandidateStrategy>>,
    lenient_quotes: bool,
}

impl RecoveryParser {
    /// Strict parser with the standard strategy chain
    pub fn new() -> Self {
        Self {
            strategies: default_strategies(),
            lenient_quotes: false,
        }
    }

    /// Standard chain plus Python-literal repair as a last pass
    pub fn lenient() -> Self {
        Self::new().with_lenient_quotes(true)
    }

    /// Enable or disable Python-literal repair
    pub fn with_lenient_quotes(mut self, enabled: bool) -> Self {
        self.lenient_quotes = enabled;
        self
    }

    /// Append a strategy after the existing ones
    pub fn with_strategy(mut self, strategy: impl CandidateStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the configured strategies, in order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Whether Python-literal repair is enabled
    pub fn is_lenient(&self) -> bool {
        self.lenient_quotes
    }

    /// Recover a JSON object from raw text
    ///
    /// Strict pass: every strategy proposes a candidate in turn and the first
    /// candidate that parses as an object wins. If that fails and repair is
    /// enabled, the same candidates are retried after Python-literal repair.
    pub fn extract(&self, raw: &str) -> ExtractionOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return ExtractionOutcome::Failure(FailureKind::Empty);
        }

        let mut tried: Vec<&str> = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let Some(candidate) = strategy.candidate(text) else {
                continue;
            };
            if tried.contains(&candidate) {
                continue;
            }
            if let Some(record) = parse_object(candidate) {
                debug!("Recovered record via '{}' strategy", strategy.name());
                return ExtractionOutcome::Success(record);
            }
            tried.push(candidate);
        }

        if self.lenient_quotes {
            for candidate in &tried {
                let Some(repaired) = repair_python_literal(candidate) else {
                    continue;
                };
                if let Some(record) = parse_object(&repaired) {
                    debug!("Recovered record after Python-literal repair");
                    return ExtractionOutcome::Success(record);
                }
            }
        }

        let kind = if is_truncated(text) {
            FailureKind::Truncated
        } else {
            FailureKind::Malformed
        };
        debug!(
            "No record recovered from {} candidate(s): {}",
            tried.len(),
            kind
        );
        ExtractionOutcome::Failure(kind)
    }
}

impl Default for RecoveryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strictly parse `candidate`, keeping it only when it is a JSON object
fn parse_object(candidate: &str) -> Option<StructuredRecord> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(record)) => Some(record),
        _ => None,
    }
}

/// Recover a JSON object from raw model output using the strict chain
pub fn extract(raw: &str) -> ExtractionOutcome {
    static PARSER: OnceLock<RecoveryParser> = OnceLock::new();
    PARSER.get_or_init(RecoveryParser::new).extract(raw)
}

/// Heuristic: the brace opened first in the text is never closed
///
/// Distinguishes output cut off mid-object (worth retrying with a larger
/// generation budget) from output that is simply malformed.
pub fn is_truncated(raw: &str) -> bool {
    scan_braces(raw) == BraceScan::Unclosed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_clean() {
        let record = extract(r#"{"key": "value"}"#).into_record().unwrap();
        assert_eq!(record["key"], "value");
    }

    #[test]
    fn test_extract_blank_is_empty_failure() {
        assert_eq!(extract(""), ExtractionOutcome::Failure(FailureKind::Empty));
        assert_eq!(extract("  \n "), ExtractionOutcome::Failure(FailureKind::Empty));
    }

    #[test]
    fn test_extract_rejects_non_object() {
        assert_eq!(extract("42").failure_kind(), Some(FailureKind::Malformed));
        assert_eq!(extract("[1, 2, 3]").failure_kind(), Some(FailureKind::Malformed));
        assert_eq!(extract("\"text\"").failure_kind(), Some(FailureKind::Malformed));
    }

    #[test]
    fn test_extract_unbalanced_is_truncated() {
        let outcome = extract(r#"{"key": "value""#);
        assert_eq!(outcome, ExtractionOutcome::Failure(FailureKind::Truncated));
    }

    #[test]
    fn test_extract_prose_only() {
        let outcome = extract("This is not JSON at all.");
        assert_eq!(outcome, ExtractionOutcome::Failure(FailureKind::Malformed));
    }

    #[test]
    fn test_fallthrough_to_later_candidate() {
        // Fenced body is an array; the balanced scan finds the real object.
        let text = "Note {\"a\": 1} and ```json\n[1]\n```";
        let record = extract(text).into_record().unwrap();
        assert_eq!(record["a"], 1);
    }

    #[test]
    fn test_strict_parser_rejects_python_literal() {
        assert!(!extract("{'key': 'value'}").is_success());
    }

    #[test]
    fn test_lenient_parser_repairs_python_literal() {
        let parser = RecoveryParser::lenient();
        let record = parser
            .extract("Result: {'key': 'value', 'ok': True}")
            .into_record()
            .unwrap();
        assert_eq!(record["key"], "value");
        assert_eq!(record["ok"], true);
    }

    #[test]
    fn test_lenient_still_fails_on_truncation() {
        let parser = RecoveryParser::lenient();
        assert_eq!(
            parser.extract("{'key': 'value'").failure_kind(),
            Some(FailureKind::Truncated)
        );
    }

    #[test]
    fn test_strict_object_wins_over_repair() {
        // Strict pass finds the second object before repair is attempted.
        let parser = RecoveryParser::lenient();
        let record = parser
            .extract("```\n{'a': 1}\n```\n```json\n{\"b\": 2}\n```")
            .into_record()
            .unwrap();
        assert_eq!(record.get("b"), Some(&json!(2)));
    }

    #[derive(Debug)]
    struct LastLine;

    impl CandidateStrategy for LastLine {
        fn name(&self) -> &'static str {
            "last-line"
        }

        fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
            text.lines().last()
        }
    }

    #[test]
    fn test_custom_strategy_appended() {
        let parser = RecoveryParser::new().with_strategy(LastLine);
        assert_eq!(
            parser.strategy_names(),
            ["direct", "fenced", "balanced-braces", "whole-text", "last-line"]
        );
        assert!(!parser.is_lenient());
    }

    #[test]
    fn test_is_truncated() {
        assert!(is_truncated(r#"{"a": {"b": 1}"#));
        assert!(!is_truncated(r#"{"a": 1}"#));
        assert!(!is_truncated("no braces"));
        assert!(!is_truncated(""));
    }
}
