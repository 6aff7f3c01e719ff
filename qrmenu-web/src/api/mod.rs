//! Router module for handling all API routes

pub mod public;
pub mod v1;

use actix_web::web;

/// Admin API, mounted under the router prefix (default `/api`).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(v1::configure_v1_routes);
}

/// Fixed root routes such as `/health`.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(public::configure_public_routes);
}

/// `/<bucket>/{path}` for the filesystem asset backend.
pub fn configure_asset_routes(cfg: &mut web::ServiceConfig, bucket: &str) {
    public::configure_asset_routes(cfg, bucket);
}

/// Per-client `/{slug}` routes; registered last since they match any segment.
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(public::configure_page_routes);
}
