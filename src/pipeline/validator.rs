use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz::{REQUIRED_MCQ, REQUIRED_SHORT};
use crate::models::domain::quiz_question::{MAX_OPTIONS, MIN_OPTIONS};
use crate::models::domain::{MultipleChoiceItem, Quiz, ShortAnswerItem, SimplifiedText};
use crate::pipeline::sanitizer::BULLET_PREFIX;

pub const MIN_BULLETS: usize = 5;
pub const MIN_SIMPLIFIED_CHARS: usize = 10;

const QUESTION_KEYS: [&str; 2] = ["q", "question"];

/// First non-empty trimmed string stored under any of `keys`.
fn text_field(entry: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn items<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn multiple_choice_item(value: &Value) -> Option<MultipleChoiceItem> {
    let entry = value.as_object()?;
    let question = text_field(entry, &QUESTION_KEYS)?;
    let answer = text_field(entry, &["answer"])?;

    let mut options: Vec<String> = entry
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .filter(|o| !o.trim().is_empty())
        .map(str::to_string)
        .collect();

    if options.len() < MIN_OPTIONS {
        return None;
    }
    options.truncate(MAX_OPTIONS);

    if !options.contains(&answer) {
        return None;
    }

    Some(MultipleChoiceItem {
        question,
        options,
        answer,
    })
}

fn short_answer_item(value: &Value) -> Option<ShortAnswerItem> {
    let entry = value.as_object()?;
    Some(ShortAnswerItem {
        question: text_field(entry, &QUESTION_KEYS)?,
        answer: text_field(entry, &["answer"])?,
    })
}

/// Checks a recovered JSON value against the quiz shape and cardinality rules.
///
/// Invalid entries are dropped; the quiz fails only when fewer than three MCQs
/// or two short-answer items survive. Extra items are cut, keeping order.
pub fn validate_quiz(value: &Value) -> AppResult<Quiz> {
    let root = value
        .as_object()
        .ok_or_else(|| AppError::SchemaViolation("Quiz must be a JSON object.".to_string()))?;

    let mcq_values = items(root, "mcq");
    let mut mcq: Vec<MultipleChoiceItem> = mcq_values
        .iter()
        .filter_map(multiple_choice_item)
        .collect();
    if mcq.len() < mcq_values.len() {
        log::debug!(
            "Dropped {} invalid MCQ entries",
            mcq_values.len() - mcq.len()
        );
    }

    let short_values = items(root, "short");
    let mut short: Vec<ShortAnswerItem> = short_values
        .iter()
        .filter_map(short_answer_item)
        .collect();

    if mcq.len() < REQUIRED_MCQ {
        return Err(AppError::SchemaViolation(format!(
            "Quiz incomplete: Expected at least {} MCQs, got {}.",
            REQUIRED_MCQ,
            mcq.len()
        )));
    }
    if short.len() < REQUIRED_SHORT {
        return Err(AppError::SchemaViolation(format!(
            "Quiz incomplete: Expected at least {} short-answer questions, got {}.",
            REQUIRED_SHORT,
            short.len()
        )));
    }

    mcq.truncate(REQUIRED_MCQ);
    short.truncate(REQUIRED_SHORT);

    Ok(Quiz { mcq, short })
}

/// Accepts sanitized bullet lines once at least five canonical bullets are present.
pub fn validate_simplified(lines: &[String]) -> AppResult<SimplifiedText> {
    let text = lines.join("\n");
    if text.trim().chars().count() < MIN_SIMPLIFIED_CHARS {
        return Err(AppError::SchemaViolation(
            "Simplified text is too short or empty.".to_string(),
        ));
    }

    let bullets: Vec<String> = lines
        .iter()
        .filter_map(|line| line.strip_prefix(BULLET_PREFIX))
        .map(str::to_string)
        .collect();

    if bullets.len() < MIN_BULLETS {
        return Err(AppError::SchemaViolation(format!(
            "Invalid output format. Expected at least {} bullet points, got {}.",
            MIN_BULLETS,
            bullets.len()
        )));
    }

    Ok(SimplifiedText { bullets })
}
