//! Bearer-token guard for the admin API.

use crate::AppState;
use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{header::AUTHORIZATION, Method},
    web::Data,
    Error, HttpMessage, HttpResponse,
};
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use qrmenu_models::{constants::BEARER_TOKEN, domain::prelude::Claims, web::WebResponse};
use qrmenu_utils::jwt::decode_jwt;
use std::{
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;

/// Rejects requests without a valid operator token with 401 and stores the
/// decoded [`Claims`] in the request extensions otherwise.
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        async move {
            // CORS preflight carries no credentials
            if Method::OPTIONS == req.method() {
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            match authenticate(&req) {
                Some(claims) => {
                    req.extensions_mut().insert(claims);
                    srv.call(req).await.map(|res| res.map_into_left_body())
                }
                None => Ok(req
                    .into_response(HttpResponse::Unauthorized().json(WebResponse::<()>::error(
                        "Invalid token, please login again",
                    )))
                    .map_into_right_body()),
            }
        }
        .boxed_local()
    }
}

fn authenticate(req: &ServiceRequest) -> Option<Claims> {
    let token = extract_bearer_token(req)?;
    let state = req.app_data::<Data<AppState>>()?;
    let jwt = &state.settings.web.jwt;
    match decode_jwt::<Claims>(token, jwt.secret.as_bytes(), Some(&jwt.issuer)) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("Rejected token: {e}");
            None
        }
    }
}

#[inline]
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
