//! Text in, validated structure out.
//!
//! Every stage here is a pure function. The only I/O in a pipeline run is the
//! backend call made by the services that drive these stages.

pub mod json_recovery;
pub mod normalizer;
pub mod prompt;
pub mod sanitizer;
pub mod validator;

pub use json_recovery::{recover_json, Recovered, RecoveryStrategy};
pub use normalizer::normalize;
pub use prompt::{build_prompt, BackendRequest, PipelineProfile, QUIZ_PROFILE, SIMPLIFY_PROFILE};
pub use sanitizer::{sanitize_bullets, sanitize_json_candidate};
pub use validator::{validate_quiz, validate_simplified};
