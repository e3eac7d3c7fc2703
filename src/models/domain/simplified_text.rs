use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pipeline::sanitizer::BULLET_PREFIX;

/// Bullet bodies (without the `"- "` marker), at most ten, each at most twelve words.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimplifiedText {
    pub bullets: Vec<String>,
}

impl SimplifiedText {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }
}

impl fmt::Display for SimplifiedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .bullets
            .iter()
            .map(|b| format!("{}{}", BULLET_PREFIX, b))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}
