use once_cell::sync::Lazy;
use regex::Regex;

/// Input ceiling for quiz generation, in characters.
pub const QUIZ_INPUT_LIMIT: usize = 10_000;
/// Input ceiling for simplification, in characters.
pub const SIMPLIFY_INPUT_LIMIT: usize = 8_000;
pub const TRUNCATION_MARKER: &str = "...";

static LINE_ENDINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r").expect("LINE_ENDINGS is a valid regex pattern"));
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES is a valid regex pattern"));
static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("SPACE_RUNS is a valid regex pattern"));

/// Whether a character renders as visible text or a plain space.
///
/// Control characters, zero-width/format characters and the non-space
/// separators (line/paragraph separators, NBSP and friends) do not count.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

fn collapse_runs(text: &str) -> String {
    let text = EXCESS_NEWLINES.replace_all(text, "\n\n");
    SPACE_RUNS.replace_all(&text, " ").into_owned()
}

/// Deterministic cleanup applied to every text before it is put into a prompt.
///
/// Never fails; the empty string maps to the empty string. Output contains no
/// tab, no run of three newlines, no run of two spaces, and is at most
/// `max_length` characters plus the truncation marker.
pub fn normalize(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let visible: String = text
        .chars()
        .filter(|c| is_printable(*c) || c.is_whitespace())
        .collect();

    let unified = LINE_ENDINGS.replace_all(&visible, "\n");
    let collapsed = collapse_runs(&unified);

    let trimmed_lines = collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    let untabbed = trimmed_lines.replace('\t', " ");

    // Trimming lines and replacing tabs can re-create runs.
    let cleaned = collapse_runs(&untabbed);
    let cleaned = cleaned.trim();

    if cleaned.chars().count() > max_length {
        let mut cut: String = cleaned.chars().take(max_length).collect();
        cut.push_str(TRUNCATION_MARKER);
        return cut;
    }

    cleaned.to_string()
}
