//! Client management API: dashboard listing, manage form (create / edit),
//! deletion and QR target.
//!
//! Create and edit take `multipart/form-data` with the text fields plus the
//! optional `pdf`, `logo`, `og_image` and `favicon` file parts.

use crate::{middleware::RequestContext, AppState};
use actix_multipart::{Field, Multipart};
use actix_web::web::{self, Data};
use actix_web_validator::{Path, Query};
use bytes::BytesMut;
use futures::StreamExt;
use qrmenu_error::{web::WebError, WebResult};
use qrmenu_models::{
    domain::prelude::{
        AssetSlot, ClientForm, ClientFormState, ClientInfo, EditQuery, PathId, PendingAssets,
        PendingUpload, QrTarget,
    },
    web::WebResponse,
};
use tracing::debug;

pub(super) const ROUTER_PREFIX: &str = "/client";

/// Upper bound for a single text part.
const MAX_TEXT_BYTES: usize = 64 * 1024;

pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/list", web::get().to(list))
        .route("/detail/{id}", web::get().to(detail))
        .route("/form/{id}", web::get().to(form))
        .route("/qr/{id}", web::get().to(qr))
        .route("/{id}", web::delete().to(delete));
}

async fn create(
    state: Data<AppState>,
    _ctx: RequestContext,
    mut multipart: Multipart,
) -> WebResult<WebResponse<ClientInfo>> {
    let (form, pending) = read_client_form(&mut multipart).await?;
    let model = state.clients.create(form, pending).await?;
    Ok(WebResponse::ok(model.into()))
}

/// `PUT /api/client?id=<id>`
async fn update(
    state: Data<AppState>,
    _ctx: RequestContext,
    query: Query<EditQuery>,
    mut multipart: Multipart,
) -> WebResult<WebResponse<ClientInfo>> {
    let (form, pending) = read_client_form(&mut multipart).await?;
    let model = state.clients.update(query.id, form, pending).await?;
    Ok(WebResponse::ok(model.into()))
}

async fn list(state: Data<AppState>, _ctx: RequestContext) -> WebResult<WebResponse<Vec<ClientInfo>>> {
    let clients = state.clients.list().await?;
    Ok(WebResponse::ok(clients.into_iter().map(Into::into).collect()))
}

async fn detail(state: Data<AppState>, req: Path<PathId>) -> WebResult<WebResponse<ClientInfo>> {
    Ok(WebResponse::ok(state.clients.get(req.id).await?.into()))
}

async fn form(state: Data<AppState>, req: Path<PathId>) -> WebResult<WebResponse<ClientFormState>> {
    Ok(WebResponse::ok(state.clients.form_state(req.id).await?))
}

async fn qr(state: Data<AppState>, req: Path<PathId>) -> WebResult<WebResponse<QrTarget>> {
    Ok(WebResponse::ok(state.clients.qr(req.id).await?))
}

async fn delete(state: Data<AppState>, req: Path<PathId>) -> WebResult<WebResponse<()>> {
    state.clients.delete(req.id).await?;
    Ok(WebResponse::<()>::ok_empty())
}

#[inline]
fn max_bytes(slot: AssetSlot) -> usize {
    match slot {
        AssetSlot::Pdf => 20 * 1024 * 1024,
        AssetSlot::Logo | AssetSlot::OgImage => 10 * 1024 * 1024,
        AssetSlot::Favicon => 1024 * 1024,
    }
}

#[inline]
fn allowed_mimes(slot: AssetSlot) -> &'static [&'static str] {
    match slot {
        AssetSlot::Pdf => &["application/pdf"],
        AssetSlot::Logo => &["image/png", "image/jpeg", "image/webp", "image/svg+xml"],
        AssetSlot::OgImage => &["image/png", "image/jpeg", "image/webp"],
        AssetSlot::Favicon => &[
            "image/x-icon",
            "image/vnd.microsoft.icon",
            "image/png",
            "image/svg+xml",
        ],
    }
}

/// Splits the manage form into its text fields and the new files per slot.
///
/// An empty file part means "no new file" for that slot.
async fn read_client_form(multipart: &mut Multipart) -> WebResult<(ClientForm, PendingAssets)> {
    let mut form = ClientForm::default();
    let mut pending = PendingAssets::default();

    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();

        match AssetSlot::from_field_name(&name) {
            Some(slot) => {
                if let Some(upload) = read_upload(&mut field, slot).await? {
                    pending.set(slot, upload);
                }
            }
            None => {
                let bytes = read_limited(&mut field, MAX_TEXT_BYTES, &name).await?;
                let value = String::from_utf8(bytes.to_vec())
                    .map_err(|_| WebError::BadRequest(format!("Field `{name}` is not UTF-8")))?;
                if !form.set_field(&name, value) {
                    debug!("Ignoring unknown form field `{name}`");
                }
            }
        }
    }

    Ok((form, pending))
}

async fn read_upload(field: &mut Field, slot: AssetSlot) -> WebResult<Option<PendingUpload>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();
    let mime = field
        .content_type()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default();

    let bytes = read_limited(field, max_bytes(slot), slot.field_name()).await?;
    if bytes.is_empty() {
        return Ok(None);
    }

    if !allowed_mimes(slot).contains(&mime.as_str()) {
        return Err(WebError::BadRequest(format!(
            "Invalid content-type for `{slot}`: `{}` (allowed: {:?})",
            if mime.is_empty() { "<empty>" } else { mime.as_str() },
            allowed_mimes(slot)
        )));
    }

    Ok(Some(PendingUpload {
        file_name,
        content_type: mime,
        bytes: bytes.freeze(),
    }))
}

/// Reads a part into memory, failing as soon as it exceeds `max_bytes`.
async fn read_limited(field: &mut Field, max_bytes: usize, name: &str) -> WebResult<BytesMut> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        if buf.len().saturating_add(data.len()) > max_bytes {
            return Err(WebError::BadRequest(format!(
                "`{name}` is too large (max {max_bytes} bytes)"
            )));
        }
        buf.extend_from_slice(&data);
    }
    Ok(buf)
}
