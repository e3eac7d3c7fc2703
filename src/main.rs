use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use neurolearn_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.validate_for_production();

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting server on {}:{} (default backend: {})",
        bind_address.0,
        bind_address.1,
        config.default_backend
    );

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::generate_quiz)
            .service(handlers::grade_quiz)
            .service(handlers::simplify_text)
            .service(handlers::create_session)
            .service(handlers::get_progress)
            .service(handlers::get_progress_summary)
    })
    .bind(bind_address)?
    .run()
    .await
}
