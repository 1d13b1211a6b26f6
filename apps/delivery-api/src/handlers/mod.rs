//! HTTP handlers and route configuration.

mod account;
mod health;
mod orders;

use actix_web::web;

use crate::middleware::error::AppError;

/// JSON body settings: malformed bodies become RFC 7807 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Account routes
            .service(
                web::scope("/account")
                    .route("/register", web::post().to(account::register))
                    .route("/login", web::post().to(account::login))
                    .route("/profile", web::get().to(account::profile))
                    .route("/profile", web::put().to(account::edit_profile)),
            )
            // Order routes
            .service(
                web::scope("/order")
                    .route("", web::post().to(orders::create_order))
                    .route("/{id}/status", web::post().to(orders::confirm_delivery)),
            ),
    );
}
