//! `GET /{slug}`: the client's public landing page.

use crate::AppState;
use actix_web::{
    http::header::{self, ContentType},
    web::{self, Data},
    HttpResponse,
};
use qrmenu_error::{web::WebError, WebResult};

pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{slug}", web::get().to(landing_page));
}

async fn landing_page(state: Data<AppState>, slug: web::Path<String>) -> WebResult<HttpResponse> {
    let slug = slug.into_inner();
    let Some((model, metadata)) = state.clients.public_page(&slug).await? else {
        let html = state
            .pages
            .not_found_page()
            .map_err(|e| WebError::InternalError(e.to_string()))?;
        return Ok(HttpResponse::NotFound()
            .content_type(ContentType::html())
            .body(html));
    };

    let html = state
        .pages
        .landing_page(&model, &metadata)
        .map_err(|e| WebError::InternalError(e.to_string()))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(html))
}
