use serde::{Deserialize, Serialize};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MultipleChoiceItem {
    #[serde(alias = "q")]
    pub question: String,
    pub options: Vec<String>, // 2-4 entries
    pub answer: String,       // always one of `options`, byte for byte
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShortAnswerItem {
    #[serde(alias = "q")]
    pub question: String,
    pub answer: String,
}

impl MultipleChoiceItem {
    pub fn is_correct(&self, response: &str) -> bool {
        self.answer == response
    }
}
