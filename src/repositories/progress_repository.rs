use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{LearningSession, QuizResult},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn save_session(&self, session: LearningSession) -> AppResult<LearningSession>;
    async fn save_quiz_result(&self, result: QuizResult) -> AppResult<QuizResult>;
    /// Newest first, at most `limit` entries.
    async fn recent_sessions(&self, user_id: &str, limit: i64) -> AppResult<Vec<LearningSession>>;
    /// Newest first, at most `limit` entries.
    async fn recent_quiz_results(&self, user_id: &str, limit: i64) -> AppResult<Vec<QuizResult>>;
}

pub struct MongoProgressRepository {
    sessions: Collection<LearningSession>,
    quiz_results: Collection<QuizResult>,
}

impl MongoProgressRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            sessions: db.get_collection(&config.sessions_collection),
            quiz_results: db.get_collection(&config.quiz_results_collection),
        }
    }

    fn user_recent_index() -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_recent".to_string())
                    .build(),
            )
            .build()
    }

    fn id_index() -> IndexModel {
        IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build()
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for progress collections");

        self.sessions.create_index(Self::id_index()).await?;
        self.sessions.create_index(Self::user_recent_index()).await?;
        self.quiz_results.create_index(Self::id_index()).await?;
        self.quiz_results
            .create_index(Self::user_recent_index())
            .await?;

        log::info!("Successfully created indexes for progress collections");
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MongoProgressRepository {
    async fn save_session(&self, session: LearningSession) -> AppResult<LearningSession> {
        self.sessions.insert_one(&session).await?;
        Ok(session)
    }

    async fn save_quiz_result(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.quiz_results.insert_one(&result).await?;
        Ok(result)
    }

    async fn recent_sessions(&self, user_id: &str, limit: i64) -> AppResult<Vec<LearningSession>> {
        let sessions = self
            .sessions
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(sessions)
    }

    async fn recent_quiz_results(&self, user_id: &str, limit: i64) -> AppResult<Vec<QuizResult>> {
        let results = self
            .quiz_results
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }
}
