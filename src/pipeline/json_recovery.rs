use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::AppError;

/// Characters of the raw reply kept for diagnostics when recovery fails.
pub const DIAGNOSTIC_SAMPLE_CHARS: usize = 500;

static GREEDY_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("GREEDY_OBJECT is a valid regex pattern"));
static BARE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)").expect("BARE_KEY is a valid regex pattern")
});
static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("TRAILING_COMMA is a valid regex pattern"));
static ADJACENT_OBJECTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}\s*\{").expect("ADJACENT_OBJECTS is a valid regex pattern"));
static ADJACENT_ARRAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\s*\[").expect("ADJACENT_ARRAYS is a valid regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    Direct,
    RegexExtract,
    BraceBalance,
    Repair,
}

impl RecoveryStrategy {
    pub const ORDER: [RecoveryStrategy; 4] = [
        RecoveryStrategy::Direct,
        RecoveryStrategy::RegexExtract,
        RecoveryStrategy::BraceBalance,
        RecoveryStrategy::Repair,
    ];

    /// The text this strategy would hand to the parser, if it applies at all.
    fn candidate(self, text: &str) -> Option<String> {
        match self {
            RecoveryStrategy::Direct => Some(text.to_string()),
            RecoveryStrategy::RegexExtract => {
                GREEDY_OBJECT.find(text).map(|m| m.as_str().to_string())
            }
            RecoveryStrategy::BraceBalance => balanced_span(text).map(str::to_string),
            RecoveryStrategy::Repair => Some(repair_json(text)),
        }
    }
}

impl fmt::Display for RecoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecoveryStrategy::Direct => "direct",
            RecoveryStrategy::RegexExtract => "regex_extract",
            RecoveryStrategy::BraceBalance => "brace_balance",
            RecoveryStrategy::Repair => "repair",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed(String),
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub strategy: RecoveryStrategy,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone)]
pub struct Recovered {
    pub value: Value,
    pub strategy: RecoveryStrategy,
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Clone)]
pub struct RecoveryFailure {
    pub last_error: String,
    pub attempts: Vec<Attempt>,
}

impl RecoveryFailure {
    pub fn into_app_error(self, raw_reply: &str) -> AppError {
        AppError::JsonRecoveryFailed {
            last_error: self.last_error,
            sample: raw_reply.chars().take(DIAGNOSTIC_SAMPLE_CHARS).collect(),
        }
    }
}

/// Parses a JSON candidate, escalating through the strategies in order until one succeeds.
pub fn recover_json(text: &str) -> Result<Recovered, RecoveryFailure> {
    let mut attempts = Vec::with_capacity(RecoveryStrategy::ORDER.len());
    let mut last_error = String::from("no recovery strategy was applicable");

    for strategy in RecoveryStrategy::ORDER {
        let Some(candidate) = strategy.candidate(text) else {
            log::debug!("JSON recovery: {} not applicable", strategy);
            attempts.push(Attempt {
                strategy,
                outcome: AttemptOutcome::NotApplicable,
            });
            continue;
        };

        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => {
                attempts.push(Attempt {
                    strategy,
                    outcome: AttemptOutcome::Succeeded,
                });
                return Ok(Recovered {
                    value,
                    strategy,
                    attempts,
                });
            }
            Err(err) => {
                log::debug!("JSON recovery: {} failed: {}", strategy, err);
                last_error = err.to_string();
                attempts.push(Attempt {
                    strategy,
                    outcome: AttemptOutcome::Failed(last_error.clone()),
                });
            }
        }
    }

    Err(RecoveryFailure {
        last_error,
        attempts,
    })
}

/// The span from the first `{` to the brace that brings the count back to zero.
pub fn balanced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Cuts `text` (starting at `{`) at its matching close, or closes whatever is still open.
fn bound_object(text: &str) -> String {
    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => open.push(c),
            '}' | ']' => {
                open.pop();
                if open.is_empty() {
                    return text[..=offset].to_string();
                }
            }
            _ => {}
        }
    }

    let mut bounded = text.to_string();
    if in_string {
        bounded.push('"');
    }
    bounded.extend(open.iter().rev().map(|c| if *c == '{' { '}' } else { ']' }));
    bounded
}

/// A single textual rewrite applied during the repair strategy.
pub struct RepairRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

pub fn quote_bare_keys(text: &str) -> String {
    BARE_KEY.replace_all(text, "${1}\"${2}\"${3}").into_owned()
}

/// Rewrites `'...'` spans as JSON strings; apostrophes inside `"..."` strings are left alone.
pub fn single_to_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut in_single = false;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if in_double {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_double = false,
                _ => {}
            }
            out.push(c);
            continue;
        }

        if in_single {
            match c {
                '\'' => {
                    in_single = false;
                    out.push('"');
                }
                '"' => out.push_str("\\\""),
                _ => out.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_double = true;
                out.push(c);
            }
            // An apostrophe with no partner is not a string delimiter.
            '\'' if text[offset + 1..].contains('\'') => {
                in_single = true;
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    out
}

pub fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "${1}").into_owned()
}

pub fn insert_missing_commas(text: &str) -> String {
    let text = ADJACENT_OBJECTS.replace_all(text, "},{");
    ADJACENT_ARRAYS.replace_all(&text, "],[").into_owned()
}

/// Applied in order, each on the output of the previous one.
pub const REPAIR_RULES: [RepairRule; 4] = [
    RepairRule {
        name: "quote_bare_keys",
        apply: quote_bare_keys,
    },
    RepairRule {
        name: "single_to_double_quotes",
        apply: single_to_double_quotes,
    },
    RepairRule {
        name: "strip_trailing_commas",
        apply: strip_trailing_commas,
    },
    RepairRule {
        name: "insert_missing_commas",
        apply: insert_missing_commas,
    },
];

/// Best-effort syntax repair; the result may still fail to parse.
pub fn repair_json(text: &str) -> String {
    let Some(start) = text.find('{') else {
        return "{}".to_string();
    };

    REPAIR_RULES
        .iter()
        .fold(bound_object(&text[start..]), |acc, rule| {
            let next = (rule.apply)(&acc);
            if next != acc {
                log::debug!("JSON repair rule {} rewrote the candidate", rule.name);
            }
            next
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strategies(attempts: &[Attempt]) -> Vec<RecoveryStrategy> {
        attempts.iter().map(|a| a.strategy).collect()
    }

    #[test]
    fn valid_json_is_parsed_directly() {
        let recovered = recover_json(r#"{"mcq": [], "short": []}"#).unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::Direct);
        assert_eq!(recovered.attempts.len(), 1);
        assert_eq!(recovered.value, json!({"mcq": [], "short": []}));
    }

    #[test]
    fn leading_text_falls_back_to_regex_extract() {
        let recovered = recover_json(r#"prefix {"a": 1}"#).unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::RegexExtract);
        assert!(matches!(recovered.attempts[0].outcome, AttemptOutcome::Failed(_)));
        assert_eq!(recovered.value, json!({"a": 1}));
    }

    #[test]
    fn two_objects_fall_back_to_brace_balance() {
        let recovered = recover_json(r#"{"a": 1} trailing {"b": 2}"#).unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::BraceBalance);
        assert_eq!(
            strategies(&recovered.attempts),
            vec![
                RecoveryStrategy::Direct,
                RecoveryStrategy::RegexExtract,
                RecoveryStrategy::BraceBalance
            ]
        );
        assert_eq!(recovered.value, json!({"a": 1}));
    }

    #[test]
    fn single_quotes_and_trailing_comma_need_repair() {
        let recovered = recover_json("{'mcq': ['a', 'b'], 'short': [],}").unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::Repair);
        assert_eq!(strategies(&recovered.attempts), RecoveryStrategy::ORDER.to_vec());
        assert!(recovered.attempts[..3]
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::Failed(_))));
        assert_eq!(recovered.value, json!({"mcq": ["a", "b"], "short": []}));
    }

    #[test]
    fn missing_closing_brace_marks_earlier_strategies_not_applicable() {
        let recovered = recover_json(r#"{"mcq": [], "short": [1, 2"#).unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::Repair);
        assert_eq!(recovered.attempts[1].outcome, AttemptOutcome::NotApplicable);
        assert_eq!(recovered.attempts[2].outcome, AttemptOutcome::NotApplicable);
        assert_eq!(recovered.value, json!({"mcq": [], "short": [1, 2]}));
    }

    #[test]
    fn unquoted_keys_are_repaired() {
        let recovered = recover_json("{mcq: [], short: []}").unwrap();
        assert_eq!(recovered.value, json!({"mcq": [], "short": []}));
    }

    #[test]
    fn exhausted_strategies_report_last_error_and_bounded_sample() {
        let failure = recover_json("{{{{").unwrap_err();
        assert_eq!(failure.attempts.len(), 4);
        assert!(!failure.last_error.is_empty());

        let raw = "x".repeat(800);
        match failure.into_app_error(&raw) {
            AppError::JsonRecoveryFailed { sample, .. } => {
                assert_eq!(sample.chars().count(), DIAGNOSTIC_SAMPLE_CHARS)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn balanced_span_stops_at_matching_close() {
        assert_eq!(balanced_span("a {b {c}} d}"), Some("{b {c}}"));
        assert_eq!(balanced_span("{ unclosed"), None);
        assert_eq!(balanced_span("none"), None);
    }

    #[test]
    fn bound_object_closes_open_delimiters_in_order() {
        assert_eq!(bound_object(r#"{"a": [{"b": 1"#), r#"{"a": [{"b": 1}]}"#);
        assert_eq!(bound_object(r#"{"a": "cut"#), r#"{"a": "cut"}"#);
    }

    #[test]
    fn bound_object_cuts_extra_closes() {
        assert_eq!(bound_object(r#"{"a": 1}}}"#), r#"{"a": 1}"#);
        assert_eq!(bound_object(r#"{"a": "}"}"#), r#"{"a": "}"}"#);
    }

    #[test]
    fn apostrophes_inside_double_quoted_values_survive_repair() {
        let recovered =
            recover_json(r#"{"q": "What's the Earth's shape?", "answer": "round",}"#).unwrap();

        assert_eq!(recovered.strategy, RecoveryStrategy::Repair);
        assert_eq!(
            recovered.value,
            json!({"q": "What's the Earth's shape?", "answer": "round"})
        );
    }

    #[test]
    fn single_quoted_spans_escape_inner_double_quotes() {
        assert_eq!(
            single_to_double_quotes(r#"{'q': 'Say "hi"', "a": "it's"}"#),
            r#"{"q": "Say \"hi\"", "a": "it's"}"#
        );
        assert_eq!(single_to_double_quotes("{\"a\": 1} it's"), "{\"a\": 1} it's");
    }

    #[test]
    fn each_repair_rule_is_independent() {
        assert_eq!(quote_bare_keys("{a: 1, b_2 : 2}"), r#"{"a": 1, "b_2" : 2}"#);
        assert_eq!(quote_bare_keys(r#"{"a": 1}"#), r#"{"a": 1}"#);
        assert_eq!(single_to_double_quotes("{'a': 'x y'}"), r#"{"a": "x y"}"#);
        assert_eq!(strip_trailing_commas("[1, 2, ]"), "[1, 2]");
        assert_eq!(strip_trailing_commas(r#"{"a": 1,
}"#), r#"{"a": 1}"#);
        assert_eq!(insert_missing_commas(r#"[{"a":1} {"b":2}]"#), r#"[{"a":1},{"b":2}]"#);
        assert_eq!(insert_missing_commas("[[1] [2]]"), "[[1],[2]]");
    }

    #[test]
    fn repair_without_any_brace_yields_empty_object() {
        assert_eq!(repair_json("no braces at all"), "{}");
    }
}
