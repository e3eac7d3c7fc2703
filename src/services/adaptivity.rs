use std::fmt;

use serde::{Deserialize, Serialize};

pub const LONG_READING_MINUTES: f64 = 30.0;
pub const HARDER_THRESHOLD: f64 = 80.0;
pub const SAME_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Simpler,
    Same,
    Harder,
}

impl ReadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Simpler => "simpler",
            ReadingLevel::Same => "same",
            ReadingLevel::Harder => "harder",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long reading sessions always step down; otherwise the quiz score decides.
pub fn next_level(score: f64, reading_minutes: f64) -> ReadingLevel {
    if reading_minutes > LONG_READING_MINUTES {
        ReadingLevel::Simpler
    } else if score >= HARDER_THRESHOLD {
        ReadingLevel::Harder
    } else if score >= SAME_THRESHOLD {
        ReadingLevel::Same
    } else {
        ReadingLevel::Simpler
    }
}
