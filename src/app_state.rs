use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoProgressRepository, ProgressRepository},
    services::{
        backend::BackendRegistry, progress_service::ProgressService, quiz_service::QuizService,
        simplify_service::SimplifyService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub simplify_service: Arc<SimplifyService>,
    pub progress_service: Arc<ProgressService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let progress_repository = Arc::new(MongoProgressRepository::new(&db, &config));
        progress_repository.ensure_indexes().await?;

        let backends = BackendRegistry::from_config(&config)?;

        let mut state = Self::from_parts(config, backends, progress_repository);
        state.db = Some(db);
        Ok(state)
    }

    /// Builds the state without a database handle.
    pub fn from_parts(
        config: Config,
        backends: BackendRegistry,
        progress_repository: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            quiz_service: Arc::new(QuizService::new(backends.clone())),
            simplify_service: Arc::new(SimplifyService::new(backends)),
            progress_service: Arc::new(ProgressService::new(progress_repository)),
            db: None,
            config: Arc::new(config),
        }
    }
}
