//! In-memory stores for unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use qrmenu_error::{asset::AssetError, storage::StorageError, AssetResult, StorageResult};
use qrmenu_models::{
    domain::prelude::{ClientPayload, PendingUpload},
    entities::prelude::ClientModel,
    AssetStore, ClientStore,
};
use sea_orm::DbErr;
use serde_json::json;
use std::sync::Mutex;

pub fn pdf(name: &str) -> PendingUpload {
    PendingUpload {
        file_name: name.into(),
        content_type: "application/pdf".into(),
        bytes: Bytes::from_static(b"%PDF-1.7"),
    }
}

pub fn png(name: &str) -> PendingUpload {
    PendingUpload {
        file_name: name.into(),
        content_type: "image/png".into(),
        bytes: Bytes::from_static(b"\x89PNG"),
    }
}

/// A record with all four assets set.
pub fn sample_model(id: i32, slug: &str) -> ClientModel {
    ClientModel {
        id,
        slug: slug.into(),
        name: "Sweet Tooth".into(),
        description: Some("Cakes and more".into()),
        seo_title: None,
        seo_keywords: Some("cakes, surat".into()),
        pdf_url: Some("https://x/client-assets/pdfs/1-old.pdf".into()),
        logo_url: Some("https://x/client-assets/logos/1-logo.png".into()),
        og_image_url: Some("https://x/client-assets/social/1-og.png".into()),
        favicon_url: Some("https://x/client-assets/favicons/1-icon.png".into()),
        json_ld: Some(json!({
            "@type": "Bakery",
            "name": "Sweet Tooth",
            "telephone": "+91 99999",
            "legacy": true,
        })),
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
struct AssetState {
    uploaded: Vec<String>,
    removed: Vec<Vec<String>>,
    fail_upload_prefix: Option<String>,
    fail_remove: bool,
}

/// Records every call; public URLs are `https://x/client-assets/<path>`.
#[derive(Default)]
pub struct MemoryAssetStore {
    state: Mutex<AssetState>,
}

impl MemoryAssetStore {
    pub fn uploaded(&self) -> Vec<String> {
        self.state.lock().unwrap().uploaded.clone()
    }

    /// One entry per `remove` call, failed calls included.
    pub fn removed(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().removed.clone()
    }

    pub fn fail_upload_under(&self, prefix: &str) {
        self.state.lock().unwrap().fail_upload_prefix = Some(prefix.into());
    }

    pub fn fail_remove(&self) {
        self.state.lock().unwrap().fail_remove = true;
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    fn bucket(&self) -> &str {
        "client-assets"
    }

    async fn upload(&self, path: &str, _bytes: Bytes, _content_type: &str) -> AssetResult<String> {
        let mut state = self.state.lock().unwrap();
        if let Some(prefix) = &state.fail_upload_prefix {
            if path.starts_with(prefix.as_str()) {
                return Err(AssetError::Rejected {
                    status: 500,
                    message: "upload refused".into(),
                });
            }
        }
        state.uploaded.push(path.to_string());
        Ok(self.public_url(path))
    }

    async fn remove(&self, paths: &[String]) -> AssetResult<()> {
        let mut state = self.state.lock().unwrap();
        state.removed.push(paths.to_vec());
        if state.fail_remove {
            return Err(AssetError::Rejected {
                status: 503,
                message: "remove refused".into(),
            });
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://x/client-assets/{path}")
    }
}

#[derive(Default)]
struct ClientState {
    rows: Vec<ClientModel>,
    next_id: i32,
    deleted: Vec<i32>,
    fail_writes: Option<String>,
}

#[derive(Default)]
pub struct MemoryClientStore {
    state: Mutex<ClientState>,
}

impl MemoryClientStore {
    pub fn with_rows(rows: Vec<ClientModel>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(ClientState {
                rows,
                next_id,
                ..Default::default()
            }),
        }
    }

    pub fn rows(&self) -> Vec<ClientModel> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn deleted(&self) -> Vec<i32> {
        self.state.lock().unwrap().deleted.clone()
    }

    /// Makes insert and update fail with a database error carrying `message`.
    pub fn fail_writes(&self, message: &str) {
        self.state.lock().unwrap().fail_writes = Some(message.into());
    }
}

fn apply(model: &mut ClientModel, payload: ClientPayload) {
    model.slug = payload.slug;
    model.name = payload.name;
    model.description = payload.description;
    model.seo_title = payload.seo_title;
    model.seo_keywords = payload.seo_keywords;
    model.pdf_url = payload.pdf_url;
    model.logo_url = payload.logo_url;
    model.og_image_url = payload.og_image_url;
    model.favicon_url = payload.favicon_url;
    model.json_ld = payload.json_ld;
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<ClientModel>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> StorageResult<Option<ClientModel>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|r| r.slug == slug).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<ClientModel>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().rev().cloned().collect())
    }

    async fn insert(&self, payload: ClientPayload) -> StorageResult<ClientModel> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.fail_writes {
            return Err(StorageError::DBError(sea_orm_err(message)));
        }
        state.next_id += 1;
        let mut model = sample_model(state.next_id, "");
        apply(&mut model, payload);
        state.rows.push(model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, payload: ClientPayload) -> StorageResult<ClientModel> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.fail_writes {
            return Err(StorageError::DBError(sea_orm_err(message)));
        }
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::EntityNotFound(format!("client {id}")))?;
        apply(row, payload);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> StorageResult<()> {
        let mut state = self.state.lock().unwrap();
        state.rows.retain(|r| r.id != id);
        state.deleted.push(id);
        Ok(())
    }
}

fn sea_orm_err(message: &str) -> DbErr {
    DbErr::Custom(message.into())
}
