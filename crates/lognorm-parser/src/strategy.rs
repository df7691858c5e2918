//! Candidate-producing recovery strategies
//!
//! A strategy looks at the (trimmed) model output and proposes at most one
//! substring that might parse as a JSON object. Strategies never parse
//! anything themselves; the [`crate::RecoveryParser`] does that in order.

use std::fmt;

const FENCE: &str = "```";

/// One step in the recovery chain
pub trait CandidateStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Propose a candidate substring of `text`, if this strategy finds one
    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// The whole trimmed text, as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectParse;

impl CandidateStrategy for DirectParse {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Interior of a triple-backtick fence, optionally language-tagged
///
/// A fence tagged `json` wins over untagged fences; otherwise the first
/// fence whose body opens with `{` is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlock;

impl CandidateStrategy for FencedBlock {
    fn name(&self) -> &'static str {
        "fenced"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let fences = fences(text);
        fences
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case("json") && !f.body.is_empty())
            .or_else(|| fences.iter().find(|f| f.body.starts_with('{')))
            .map(|f| f.body)
    }
}

/// Substring from the first `{` to the brace that closes it
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedBraces;

impl CandidateStrategy for BalancedBraces {
    fn name(&self) -> &'static str {
        "balanced-braces"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        match scan_braces(text) {
            BraceScan::Balanced(span) => Some(span),
            BraceScan::Unclosed | BraceScan::NoBrace => None,
        }
    }
}

/// The whole trimmed text when it opens with `{`
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeText;

impl CandidateStrategy for WholeText {
    fn name(&self) -> &'static str {
        "whole-text"
    }

    fn candidate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let trimmed = text.trim();
        trimmed.starts_with('{').then_some(trimmed)
    }
}

/// Result of a brace-depth scan from the first `{`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BraceScan<'a> {
    /// Depth returned to zero; the balanced span
    Balanced(&'a str),
    /// Text ended with depth still above zero
    Unclosed,
    /// No `{` at all
    NoBrace,
}

/// Walk forward from the first `{`, tracking nesting depth
///
/// Braces inside string literals are counted like any other brace.
pub(crate) fn scan_braces(text: &str) -> BraceScan<'_> {
    let Some(start) = text.find('{') else {
        return BraceScan::NoBrace;
    };

    let mut depth: usize = 0;
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return BraceScan::Balanced(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    BraceScan::Unclosed
}

#[derive(Debug)]
struct Fence<'a> {
    label: &'a str,
    body: &'a str,
}

fn is_label_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'+' | b'.')
}

/// Pair up fences in order of appearance; an unclosed fence ends the scan
fn fences(text: &str) -> Vec<Fence<'_>> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let label_len = after_open.bytes().take_while(|b| is_label_byte(*b)).count();
        let (label, body_and_rest) = after_open.split_at(label_len);

        let Some(close) = body_and_rest.find(FENCE) else {
            break;
        };
        found.push(Fence {
            label,
            body: body_and_rest[..close].trim(),
        });
        rest = &body_and_rest[close + FENCE.len()..];
    }

    found
}

/// The standard chain, in priority order
pub fn default_strategies() -> Vec<Box<dyn CandidateStrategy>> {
    vec![
        Box::new(DirectParse),
        Box::new(FencedBlock),
        Box::new(BalancedBraces),
        Box::new(WholeText),
    ]
}
