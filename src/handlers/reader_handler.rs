use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::SimplifyRequest, response::SimplifyResponse},
    services::backend::BackendCredentials,
};

#[post("/api/reader/simplify")]
pub async fn simplify_text(
    state: web::Data<AppState>,
    request: web::Json<SimplifyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let credentials =
        BackendCredentials::resolve(&state.config, request.api_key.as_deref(), request.backend)?;
    let simplified = state
        .simplify_service
        .simplify_text(&request.text, &credentials)
        .await?;

    Ok(HttpResponse::Ok().json(SimplifyResponse::from(simplified)))
}
