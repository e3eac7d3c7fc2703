use crate::models::domain::{MultipleChoiceItem, Quiz, ShortAnswerItem};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A backend quiz reply with one MCQ and one short item more than needed.
    pub fn quiz_reply_json() -> String {
        serde_json::json!({
            "mcq": [
                {"q": "What do plants use to capture light?", "options": ["chlorophyll", "water", "soil", "salt"], "answer": "chlorophyll"},
                {"q": "Which gas do plants release?", "options": ["oxygen", "helium"], "answer": "oxygen"},
                {"q": "Where do plants take in water?", "options": ["leaves", "roots", "flowers"], "answer": "roots"},
                {"q": "What do plants make?", "options": ["sugar", "plastic"], "answer": "sugar"}
            ],
            "short": [
                {"q": "Name the process plants use to make food.", "answer": "photosynthesis"},
                {"q": "What energy source do plants need?", "answer": "sunlight"},
                {"q": "What colour is chlorophyll?", "answer": "green"}
            ]
        })
        .to_string()
    }

    /// The validated form of `quiz_reply_json`.
    pub fn sample_quiz() -> Quiz {
        let mcq = |q: &str, options: &[&str], answer: &str| MultipleChoiceItem {
            question: q.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        };
        let short = |q: &str, answer: &str| ShortAnswerItem {
            question: q.to_string(),
            answer: answer.to_string(),
        };

        Quiz {
            mcq: vec![
                mcq(
                    "What do plants use to capture light?",
                    &["chlorophyll", "water", "soil", "salt"],
                    "chlorophyll",
                ),
                mcq("Which gas do plants release?", &["oxygen", "helium"], "oxygen"),
                mcq(
                    "Where do plants take in water?",
                    &["leaves", "roots", "flowers"],
                    "roots",
                ),
            ],
            short: vec![
                short("Name the process plants use to make food.", "photosynthesis"),
                short("What energy source do plants need?", "sunlight"),
            ],
        }
    }

    /// `count` bullet lines cycling through the marker styles a model tends to use.
    pub fn numbered_bullet_reply(count: usize) -> String {
        (1..=count)
            .map(|i| match i % 4 {
                0 => format!("{}. Point {} is short", i, i),
                1 => format!("• Point {} is short", i),
                2 => format!("* Point {} is short", i),
                _ => format!("Point {} is short", i),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use crate::{
        app_state::AppState,
        config::Config,
        repositories::progress_repository::MockProgressRepository,
        services::backend::{BackendRegistry, MockGenerativeBackend},
    };

    /// State whose Gemini backend is `gemini`; the OpenAI backend expects no calls.
    pub fn app_state_with(gemini: MockGenerativeBackend, repository: MockProgressRepository) -> AppState {
        AppState::from_parts(
            Config::test_config(),
            BackendRegistry::new(Arc::new(gemini), Arc::new(MockGenerativeBackend::new())),
            Arc::new(repository),
        )
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::pipeline::{recover_json, sanitize_bullets, validate_quiz};

    #[test]
    fn test_fixture_reply_validates_to_sample_quiz() {
        let recovered = recover_json(&quiz_reply_json()).unwrap();
        assert_eq!(validate_quiz(&recovered.value).unwrap(), sample_quiz());
    }

    #[test]
    fn test_fixture_bullets_use_mixed_markers() {
        let reply = numbered_bullet_reply(4);
        assert!(reply.contains("• Point 1"));
        assert!(reply.contains("4. Point 4"));
        assert_eq!(sanitize_bullets(&reply).len(), 4);
    }
}
