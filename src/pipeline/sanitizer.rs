use once_cell::sync::Lazy;
use regex::Regex;

use crate::pipeline::normalizer::is_printable;

/// Bullet lines kept from a simplification reply.
pub const MAX_BULLETS: usize = 10;
/// Words kept per bullet body.
pub const MAX_BULLET_WORDS: usize = 12;
pub const BULLET_PREFIX: &str = "- ";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```[a-z0-9_+\-]*[ \t]*\r?\n?").expect("CODE_FENCE is a valid regex pattern")
});
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("BOLD is a valid regex pattern"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("ITALIC is a valid regex pattern"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").expect("HEADING is a valid regex pattern"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("INLINE_CODE is a valid regex pattern"));
static GREEDY_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("GREEDY_OBJECT is a valid regex pattern"));
static SYMBOL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-•*]\s+").expect("SYMBOL_MARKER is a valid regex pattern"));
static NUMBER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s+").expect("NUMBER_MARKER is a valid regex pattern"));

const JSON_PUNCTUATION: &str = " \n\t{}[]\",:-";

/// Removes code fences and unwraps bold, italic, heading and inline-code markup.
pub fn strip_markdown(raw: &str) -> String {
    let text = CODE_FENCE.replace_all(raw, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    INLINE_CODE.replace_all(&text, "$1").into_owned()
}

/// Reduces a quiz reply to the JSON object it most likely contains.
pub fn sanitize_json_candidate(raw: &str) -> String {
    let text = strip_markdown(raw);

    let sliced = match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => &text[first..=last],
        _ => text.as_str(),
    };

    // The allow-list is a filter of last resort; any printable character survives.
    let filtered: String = sliced
        .chars()
        .filter(|c| JSON_PUNCTUATION.contains(*c) || c.is_ascii_alphanumeric() || is_printable(*c))
        .collect();
    let filtered = filtered.trim();

    if !filtered.starts_with('{') {
        if let Some(found) = GREEDY_OBJECT.find(filtered) {
            return found.as_str().to_string();
        }
    }

    filtered.to_string()
}

/// Rewrites a trimmed, non-empty line so it starts with the canonical `"- "` marker.
pub fn canonicalize_bullet(line: &str) -> String {
    if SYMBOL_MARKER.is_match(line) {
        return SYMBOL_MARKER.replace(line, BULLET_PREFIX).into_owned();
    }
    if NUMBER_MARKER.is_match(line) {
        return NUMBER_MARKER.replace(line, BULLET_PREFIX).into_owned();
    }
    if line.starts_with(BULLET_PREFIX) {
        return line.to_string();
    }
    format!("{}{}", BULLET_PREFIX, line)
}

/// Collapses whitespace in a bullet body and keeps at most its first twelve words.
///
/// Bodies shorter than three words are left alone.
pub fn cap_bullet_words(body: &str) -> String {
    body.split_whitespace()
        .take(MAX_BULLET_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a simplification reply into at most ten canonical bullet lines.
pub fn sanitize_bullets(raw: &str) -> Vec<String> {
    let text: String = strip_markdown(raw)
        .chars()
        .filter(|c| *c == '\n' || *c == '\t' || is_printable(*c))
        .collect();

    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(canonicalize_bullet)
        .take(MAX_BULLETS)
        .filter_map(|line| {
            let body = cap_bullet_words(&line[BULLET_PREFIX.len()..]);
            (!body.is_empty()).then(|| format!("{}{}", BULLET_PREFIX, body))
        })
        .collect()
}
