pub mod health_handler;
pub mod progress_handler;
pub mod quiz_handler;
pub mod reader_handler;

pub use health_handler::{health_check, health_check_ready};
pub use progress_handler::{create_session, get_progress, get_progress_summary};
pub use quiz_handler::{generate_quiz, grade_quiz};
pub use reader_handler::simplify_text;
