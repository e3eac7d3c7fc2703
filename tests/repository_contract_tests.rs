use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::RwLock;

use neurolearn_server::{
    errors::{AppError, AppResult},
    models::domain::{LearningSession, QuizResult},
    repositories::ProgressRepository,
    services::progress_service::{ProgressService, RECENT_LIMIT},
};

#[derive(Default)]
struct InMemoryProgressRepository {
    sessions: RwLock<Vec<LearningSession>>,
    quiz_results: RwLock<Vec<QuizResult>>,
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn save_session(&self, session: LearningSession) -> AppResult<LearningSession> {
        let mut sessions = self.sessions.write().await;
        if sessions.iter().any(|s| s.id == session.id) {
            return Err(AppError::DatabaseError(format!(
                "Session with id '{}' already exists",
                session.id
            )));
        }
        sessions.push(session.clone());
        Ok(session)
    }

    async fn save_quiz_result(&self, result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.quiz_results.write().await;
        if results.iter().any(|r| r.id == result.id) {
            return Err(AppError::DatabaseError(format!(
                "Quiz result with id '{}' already exists",
                result.id
            )));
        }
        results.push(result.clone());
        Ok(result)
    }

    async fn recent_sessions(&self, user_id: &str, limit: i64) -> AppResult<Vec<LearningSession>> {
        let sessions = self.sessions.read().await;
        let mut items: Vec<_> = sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn recent_quiz_results(&self, user_id: &str, limit: i64) -> AppResult<Vec<QuizResult>> {
        let results = self.quiz_results.read().await;
        let mut items: Vec<_> = results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }
}

fn make_session(user_id: &str, level: &str, day: u32) -> LearningSession {
    let mut session = LearningSession::new_session(user_id, "raw text", "- simple text", level);
    session.created_at = Utc.with_ymd_and_hms(2024, 6, day, 18, 0, 0).unwrap();
    session
}

fn make_result(user_id: &str, score: f64, minutes_ago: i64) -> QuizResult {
    let mut result = QuizResult::new(user_id, score);
    result.created_at = Utc::now() - Duration::minutes(minutes_ago);
    result
}

#[actix_rt::test]
async fn progress_repository_returns_newest_first_and_limits() {
    let repo = InMemoryProgressRepository::default();

    for day in 1..=7 {
        repo.save_session(make_session("alice", "same", day))
            .await
            .unwrap();
    }
    repo.save_session(make_session("bob", "harder", 8))
        .await
        .unwrap();

    let recent = repo.recent_sessions("alice", RECENT_LIMIT).await.unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|s| s.user_id == "alice"));
    assert_eq!(recent[0].created_at.format("%d").to_string(), "07");
    assert_eq!(recent[4].created_at.format("%d").to_string(), "03");

    assert!(repo.recent_sessions("nobody", RECENT_LIMIT).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn progress_repository_rejects_duplicate_ids() {
    let repo = InMemoryProgressRepository::default();
    let result = make_result("alice", 70.0, 1);

    repo.save_quiz_result(result.clone()).await.unwrap();
    let err = repo.save_quiz_result(result).await.unwrap_err();
    assert!(matches!(err, AppError::DatabaseError(_)));
}

#[actix_rt::test]
async fn progress_service_saves_and_reads_back() {
    let repo = Arc::new(InMemoryProgressRepository::default());
    let service = ProgressService::new(repo.clone());

    let session = service
        .save_session("alice", "Long text.", "- Short text.", "simpler")
        .await
        .unwrap();
    assert_eq!(session.level, "simpler");

    for score in [40.0, 60.0, 80.0, 90.0, 100.0, 20.0] {
        service.save_quiz_result("alice", score).await.unwrap();
    }

    let progress = service.get_progress("alice").await.unwrap();
    assert_eq!(progress.sessions.len(), 1);
    assert_eq!(progress.sessions[0].level, "simpler");
    assert_eq!(progress.quizzes.len(), 5);
    assert!(progress
        .quizzes
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[actix_rt::test]
async fn progress_service_validates_inputs() {
    let service = ProgressService::new(Arc::new(InMemoryProgressRepository::default()));

    assert!(matches!(
        service.save_quiz_result("alice", 101.0).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.save_quiz_result("alice", f64::NAN).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.save_quiz_result("   ", 50.0).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.save_session("alice", "raw", "simple", " ").await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.get_progress("").await,
        Err(AppError::ValidationError(_))
    ));
}

#[actix_rt::test]
async fn progress_summary_combines_points_streak_and_badges() {
    let repo = Arc::new(InMemoryProgressRepository::default());
    for day in [10, 11, 12, 14, 15] {
        repo.save_session(make_session("carol", "same", day))
            .await
            .unwrap();
    }
    repo.save_quiz_result(make_result("carol", 45.0, 1))
        .await
        .unwrap();
    repo.save_quiz_result(make_result("carol", 95.5, 30))
        .await
        .unwrap();

    let service = ProgressService::new(repo);
    let summary = service.summary("carol").await.unwrap();

    assert_eq!(summary.total_points, 140);
    assert_eq!(summary.last_quiz_score, Some(45.0));
    assert_eq!(summary.streak_days, 3);
    assert_eq!(summary.badges, vec!["Learning Champ".to_string()]);
    assert_eq!(summary.activity_dates.len(), 5);
    assert_eq!(
        summary.recommended_level.map(|l| l.to_string()),
        Some("simpler".to_string())
    );
}
