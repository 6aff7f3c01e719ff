pub(crate) mod auth;
pub(crate) mod cors;

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use qrmenu_models::domain::prelude::Claims;

/// Identity attached by [`auth::Authentication`].
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub grant: Option<Claims>,
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(RequestContext {
            grant: req.extensions().get::<Claims>().cloned(),
        }))
    }
}
