use actix_cors::Cors;
use actix_web::http::Method;
use qrmenu_models::settings::{Cors as QMCors, CorsMode};

pub(crate) fn middleware(cors_config: &QMCors) -> Cors {
    match cors_config.mode {
        CorsMode::AllowAll => Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600),
        CorsMode::Whitelist => {
            let origins = cors_config.whitelist.origins.clone();
            let mut cors = Cors::default()
                .allowed_origin_fn(move |origin, _| {
                    origin
                        .to_str()
                        .is_ok_and(|origin| origins.iter().any(|o| o == origin))
                })
                .allowed_methods(
                    cors_config
                        .whitelist
                        .methods
                        .iter()
                        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
                        .collect::<Vec<Method>>(),
                )
                .allowed_headers(cors_config.whitelist.headers.clone())
                .max_age(3600);

            if cors_config.whitelist.credentials {
                cors = cors.supports_credentials();
            }
            cors
        }
    }
}
