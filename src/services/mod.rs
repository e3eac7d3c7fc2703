pub mod adaptivity;
pub mod backend;
pub mod gamification;
pub mod progress_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod simplify_service;
