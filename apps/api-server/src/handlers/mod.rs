//! HTTP handlers and route configuration.

mod health;
mod user;

use actix_web::web;

use crate::middleware::error::json_config;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/user")
                    .app_data(json_config())
                    .route(web::post().to(user::sign_up_or_in))
                    .route(web::get().to(user::get_user_info)),
            ),
    );
}
