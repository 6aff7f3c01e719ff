pub mod constants;
pub mod domain;
pub mod entities;
pub mod settings;
pub mod web;

use crate::{domain::prelude::ClientPayload, entities::prelude::ClientModel};
use async_trait::async_trait;
use bytes::Bytes;
use qrmenu_error::{
    init::InitContextError, storage::StorageError, AssetResult, QMResult, StorageResult,
};
use sea_orm::DatabaseConnection;
use settings::Settings;
use std::sync::Arc;

/// Database management interface.
///
/// Owns the connection pool and runs schema migrations on init.
#[async_trait]
pub trait DbManager: Send + Sync + 'static {
    /// Connects and migrates using the provided settings.
    async fn init(settings: &Settings) -> QMResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    /// Retrieves a database connection from the connection pool.
    fn get_connection(&self) -> QMResult<DatabaseConnection, StorageError>;

    /// Gracefully closes all database connections.
    async fn close(&self) -> QMResult<()>;
}

/// Path-addressed blob storage under a single bucket namespace.
///
/// Paths are relative to the bucket, e.g. `pdfs/1718000000000-menu.pdf`.
#[async_trait]
pub trait AssetStore: Send + Sync + 'static {
    /// Bucket namespace; public URLs contain `/<bucket>/` right before the path.
    fn bucket(&self) -> &str;

    /// Stores `bytes` at `path` and returns the public URL of the new blob.
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str) -> AssetResult<String>;

    /// Removes every listed path in one call. Missing blobs are not an error.
    async fn remove(&self, paths: &[String]) -> AssetResult<()>;

    /// Public URL for a path, without checking that the blob exists.
    fn public_url(&self, path: &str) -> String;
}

/// Exact-match access to the client table.
#[async_trait]
pub trait ClientStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<ClientModel>>;

    async fn find_by_slug(&self, slug: &str) -> StorageResult<Option<ClientModel>>;

    /// All clients, newest first.
    async fn list(&self) -> StorageResult<Vec<ClientModel>>;

    async fn insert(&self, payload: ClientPayload) -> StorageResult<ClientModel>;

    /// Overwrites every payload column of row `id`.
    ///
    /// Returns `StorageError::EntityNotFound` when the row does not exist.
    async fn update(&self, id: i32, payload: ClientPayload) -> StorageResult<ClientModel>;

    async fn delete(&self, id: i32) -> StorageResult<()>;
}

/// Web server interface.
#[async_trait]
pub trait WebServer: Send + Sync + 'static {
    /// Binds and starts serving in the background.
    async fn init(
        settings: &Settings,
        clients: Arc<dyn ClientStore>,
        assets: Arc<dyn AssetStore>,
    ) -> QMResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    /// Gracefully stops the server.
    async fn stop(&self) -> QMResult<()>;
}
