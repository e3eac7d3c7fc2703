pub mod learning_session;
pub mod progress;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_result;
pub mod simplified_text;
pub use learning_session::LearningSession;
pub use progress::{Progress, ProgressSummary};
pub use quiz::Quiz;
pub use quiz_question::{MultipleChoiceItem, ShortAnswerItem};
pub use quiz_result::{QuizGrade, QuizResult};
pub use simplified_text::SimplifiedText;
