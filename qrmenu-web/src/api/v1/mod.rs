//! V1 version API routes
mod auth;
mod client;

use crate::middleware::auth::Authentication;
use actix_web::web;

/// Configure all v1 routes
pub fn configure_v1_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_public_routes)
        .configure(configure_protected_routes);
}

fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        format!("{}/login", auth::ROUTER_PREFIX).as_str(),
        web::post().to(auth::login),
    );
}

fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(client::ROUTER_PREFIX)
            .wrap(Authentication)
            .configure(client::configure_routes),
    );
}
