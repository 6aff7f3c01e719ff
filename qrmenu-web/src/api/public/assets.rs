//! `GET /<bucket>/{path}`: blobs of the filesystem asset backend.

use crate::AppState;
use actix_files::NamedFile;
use actix_web::{
    http::header::{self, HeaderValue},
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use qrmenu_storage::asset::validate_path;

pub fn configure_asset_routes(cfg: &mut web::ServiceConfig, bucket: &str) {
    cfg.route(
        format!("/{bucket}/{{path:.*}}").as_str(),
        web::get().to(serve_asset),
    );
}

async fn serve_asset(
    req: HttpRequest,
    state: Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(root) = state.asset_root.as_ref() else {
        return HttpResponse::NotFound().finish();
    };
    if validate_path(&path).is_err() {
        return HttpResponse::NotFound().finish();
    }

    match NamedFile::open_async(root.join(path.as_str())).await {
        Ok(file) => {
            let mut resp = file.into_response(&req);
            // blob names carry an upload timestamp, so a path never changes content
            resp.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=31536000, immutable"),
            );
            resp
        }
        Err(_) => HttpResponse::NotFound().finish(),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use actix_web::{http::StatusCode, test};
    use bytes::Bytes;
    use qrmenu_models::AssetStore;

    #[actix_web::test]
    async fn test_serves_uploaded_blob() {
        let app = TestApp::new().await;
        let url = app
            .assets
            .upload("logos/1-logo.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://assets.test/client-assets/logos/1-logo.png");
        let srv = test::init_service(app.app()).await;

        let req = test::TestRequest::get()
            .uri("/client-assets/logos/1-logo.png")
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "png");

        let req = test::TestRequest::get()
            .uri("/client-assets/logos/missing.png")
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_rejects_traversal() {
        let app = TestApp::new().await;
        let srv = test::init_service(app.app()).await;

        for uri in [
            "/client-assets/logos/../../qrmenu.toml",
            "/client-assets//etc/passwd",
            "/client-assets/logos%5C..%5C..%5Cqrmenu.toml",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&srv, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
