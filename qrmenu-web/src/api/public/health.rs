//! Root health check for load balancers and container orchestrators.

use actix_web::{web, HttpResponse};

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health() {
        let srv = test::init_service(App::new().configure(configure_health_routes)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "OK");
    }
}
