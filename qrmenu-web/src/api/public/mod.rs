//! Public (non-API-prefix) routes.
//!
//! Mounted at the root and reachable without a token.

mod assets;
mod health;
mod page;
mod pdf;

use actix_web::web;

#[inline]
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_health_routes);
}

#[inline]
pub fn configure_asset_routes(cfg: &mut web::ServiceConfig, bucket: &str) {
    assets::configure_asset_routes(cfg, bucket);
}

#[inline]
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pdf::configure_pdf_routes)
        .configure(page::configure_page_routes);
}
