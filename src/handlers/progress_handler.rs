use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::CreateSessionRequest, response::CreatedResponse},
};

#[post("/api/sessions")]
pub async fn create_session(
    state: web::Data<AppState>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let session = state
        .progress_service
        .save_session(
            &request.user_id,
            &request.raw_text,
            &request.simplified_text,
            &request.level,
        )
        .await?;

    Ok(HttpResponse::Created().json(CreatedResponse {
        id: session.id,
        message: "Session saved".to_string(),
    }))
}

#[get("/api/progress/{user_id}")]
pub async fn get_progress(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let progress = state.progress_service.get_progress(&user_id).await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[get("/api/progress/{user_id}/summary")]
pub async fn get_progress_summary(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let summary = state.progress_service.summary(&user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
