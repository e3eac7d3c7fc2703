use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LearningSession {
    pub id: String,
    pub user_id: String,
    pub raw_text: String,
    pub simplified_text: String,
    pub level: String, // reading level the learner chose, e.g. "simpler"
    pub created_at: DateTime<Utc>,
}

impl LearningSession {
    pub fn new_session(user_id: &str, raw_text: &str, simplified_text: &str, level: &str) -> Self {
        LearningSession {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            raw_text: raw_text.to_string(),
            simplified_text: simplified_text.to_string(),
            level: level.to_string(),
            created_at: Utc::now(),
        }
    }
}
