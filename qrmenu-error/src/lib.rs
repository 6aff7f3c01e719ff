pub mod asset;
pub mod client;
pub mod init;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use asset::AssetError;
use client::ClientError;
use config::ConfigError;
use init::InitContextError;
use sea_orm::DbErr;
use serde_json::Error as SerdeJsonError;
use std::{error::Error as StdError, io::Error as IoError};
use storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;
use web::WebError;

pub type QMResult<T, E = QMError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;
pub type AssetResult<T, E = AssetError> = Result<T, E>;
pub type ClientResult<T, E = ClientError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum QMError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    JoinError(#[from] JoinError),
    #[error("{0}")]
    StdError(#[from] Box<dyn StdError + Send + Sync>),
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    AssetError(#[from] AssetError),
    #[error("{0}")]
    ClientError(#[from] ClientError),
    #[error("{0}")]
    InitContextError(#[from] InitContextError),
    #[error("{0}")]
    WebError(#[from] WebError),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Shutdown error: {0}")]
    ShutdownError(String),
}

impl From<String> for QMError {
    #[inline]
    fn from(e: String) -> Self {
        QMError::Msg(e)
    }
}

impl From<&str> for QMError {
    #[inline]
    fn from(e: &str) -> Self {
        QMError::Msg(e.to_string())
    }
}

impl From<DbErr> for QMError {
    #[inline]
    fn from(e: DbErr) -> Self {
        QMError::StorageError(StorageError::DBError(e))
    }
}
