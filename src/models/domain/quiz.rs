use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::{MultipleChoiceItem, ShortAnswerItem};

pub const REQUIRED_MCQ: usize = 3;
pub const REQUIRED_SHORT: usize = 2;

/// A validated quiz holds exactly three MCQs and two short-answer items.
/// The empty quiz is only produced for empty input text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub mcq: Vec<MultipleChoiceItem>,
    pub short: Vec<ShortAnswerItem>,
}

impl Quiz {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.mcq.is_empty() && self.short.is_empty()
    }
}
