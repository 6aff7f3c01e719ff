use crate::AppState;
use actix_web::web::Data;
use actix_web_validator::Json;
use chrono::Utc;
use qrmenu_error::{web::WebError, WebResult};
use qrmenu_models::{
    constants::BEARER_TOKEN,
    domain::prelude::{Claims, LoginRequest, LoginResponse},
    web::WebResponse,
};
use qrmenu_utils::{hash::bcrypt_check, jwt::encode_jwt};
use tracing::{info, warn};

pub(super) const ROUTER_PREFIX: &str = "/auth";

/// `POST /api/auth/login`
///
/// Checks the operator credentials from the settings and issues a bearer token.
pub async fn login(
    state: Data<AppState>,
    req: Json<LoginRequest>,
) -> WebResult<WebResponse<LoginResponse>> {
    let admin = &state.settings.admin;
    let email_matches = req.email.trim().eq_ignore_ascii_case(admin.email.trim());

    // an empty hash never verifies, so login stays disabled until one is configured
    if !email_matches || !bcrypt_check(&req.password, &admin.password_hash) {
        warn!("Rejected login for `{}`", req.email);
        return Err(WebError::Unauthorized);
    }

    let jwt = &state.settings.web.jwt;
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: admin.email.clone(),
        iss: jwt.issuer.clone(),
        iat: now,
        exp: now + jwt.expire,
    };

    let token = encode_jwt(&claims, jwt.secret.as_bytes(), None)
        .map_err(|_| WebError::InternalError("Failed to encode JWT".to_string()))?;

    info!("Operator `{}` logged in", admin.email);
    Ok(WebResponse::ok(LoginResponse {
        access_token: token,
        token_type: BEARER_TOKEN.to_string(),
        expires_in: jwt.expire,
    }))
}
