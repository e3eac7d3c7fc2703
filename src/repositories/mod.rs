pub mod progress_repository;

pub use progress_repository::{MongoProgressRepository, ProgressRepository};
