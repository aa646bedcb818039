//! Application factory
//!
//! Builds the Actix-web application over an injected session service.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::routes::session::{logout::logout, refresh::refresh, AppState};

use sm_core::repositories::{TokenBlacklist, UserDirectory};

/// Create and configure the application with all dependencies
pub fn create_app<B, U>(
    app_state: web::Data<AppState<B, U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    B: TokenBlacklist + 'static,
    U: UserDirectory + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/session")
                    .route("/refresh", web::post().to(refresh::<B, U>))
                    .route("/logout", web::post().to(logout::<B, U>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shelfmark-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource does not exist",
    }))
}
