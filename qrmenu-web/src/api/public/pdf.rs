//! `GET /{slug}/pdf`: re-serves the stored menu PDF from this origin.

use crate::AppState;
use actix_web::{
    http::header,
    web::{self, Data},
    HttpResponse,
};
use qrmenu_error::WebResult;
use tracing::warn;

pub fn configure_pdf_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{slug}/pdf", web::get().to(menu_pdf));
}

async fn menu_pdf(state: Data<AppState>, slug: web::Path<String>) -> WebResult<HttpResponse> {
    let Some(url) = state.clients.pdf_url(&slug).await? else {
        return Ok(HttpResponse::NotFound().body("PDF Not Found"));
    };

    let bytes = match fetch(&state.http, &url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to fetch pdf for `{slug}` from {url}: {e}");
            return Ok(HttpResponse::InternalServerError().body("Error fetching PDF"));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((header::CONTENT_DISPOSITION, r#"inline; filename="menu.pdf""#))
        .insert_header((
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.settings.proxy.cache_max_age_secs),
        ))
        .body(bytes))
}

async fn fetch(http: &reqwest::Client, url: &str) -> reqwest::Result<bytes::Bytes> {
    http.get(url).send().await?.error_for_status()?.bytes().await
}

#[cfg(test)]
mod tests {
    use crate::test_support::{sample_payload, TestApp};
    use actix_web::{http::StatusCode, test};
    use qrmenu_models::ClientStore;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[actix_web::test]
    async fn test_pdf_is_passed_through_with_cache_headers() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client-assets/pdfs/1-menu.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 menu".to_vec()))
            .expect(1)
            .mount(&upstream)
            .await;

        let app = TestApp::new().await;
        let mut payload = sample_payload("sweet-tooth");
        payload.pdf_url = Some(format!("{}/client-assets/pdfs/1-menu.pdf", upstream.uri()));
        app.clients.insert(payload).await.unwrap();
        let srv = test::init_service(app.app()).await;

        let req = test::TestRequest::get().uri("/sweet-tooth/pdf").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers.get("content-type").unwrap(), "application/pdf");
        assert_eq!(
            headers.get("content-disposition").unwrap(),
            r#"inline; filename="menu.pdf""#
        );
        assert_eq!(headers.get("cache-control").unwrap(), "public, max-age=3600");
        assert_eq!(test::read_body(resp).await, "%PDF-1.7 menu");
    }

    #[actix_web::test]
    async fn test_missing_pdf_is_404() {
        let app = TestApp::new().await;
        let mut payload = sample_payload("no-pdf");
        payload.pdf_url = None;
        app.clients.insert(payload).await.unwrap();
        let srv = test::init_service(app.app()).await;

        for uri in ["/no-pdf/pdf", "/nobody/pdf"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&srv, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert_eq!(test::read_body(resp).await, "PDF Not Found");
        }
    }

    #[actix_web::test]
    async fn test_upstream_failure_is_500() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;

        let app = TestApp::new().await;
        let mut payload = sample_payload("sweet-tooth");
        payload.pdf_url = Some(format!("{}/client-assets/pdfs/gone.pdf", upstream.uri()));
        app.clients.insert(payload).await.unwrap();
        let srv = test::init_service(app.app()).await;

        let req = test::TestRequest::get().uri("/sweet-tooth/pdf").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(test::read_body(resp).await, "Error fetching PDF");
    }
}
