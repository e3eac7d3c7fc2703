use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{GenerateQuizRequest, GradeQuizRequest},
        response::GradeQuizResponse,
    },
    services::{
        adaptivity, backend::BackendCredentials, gamification,
        quiz_attempt_service::QuizAttemptService,
    },
};

#[post("/api/quizzes/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let credentials =
        BackendCredentials::resolve(&state.config, request.api_key.as_deref(), request.backend)?;
    let quiz = state
        .quiz_service
        .generate_quiz(&request.text, &credentials)
        .await?;

    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/grade")]
pub async fn grade_quiz(
    state: web::Data<AppState>,
    request: web::Json<GradeQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let grade = QuizAttemptService::grade_attempt(&request.quiz, &request.responses)?;
    let score = f64::from(grade.score);
    let reading_minutes = request.reading_minutes.unwrap_or(0.0);

    let result_id = match request.user_id.as_deref() {
        Some(user_id) => Some(
            state
                .progress_service
                .save_quiz_result(user_id, score)
                .await?
                .id,
        ),
        None => None,
    };

    Ok(HttpResponse::Ok().json(GradeQuizResponse {
        points: gamification::award_points(score, reading_minutes),
        next_level: adaptivity::next_level(score, reading_minutes),
        grade,
        result_id,
    }))
}
