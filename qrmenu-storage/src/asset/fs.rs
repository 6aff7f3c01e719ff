//! Local filesystem bucket, served by the web layer under `/<bucket>/`.

use super::validate_path;
use async_trait::async_trait;
use bytes::Bytes;
use qrmenu_error::{asset::AssetError, AssetResult};
use qrmenu_models::AssetStore;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, instrument};

pub struct FsAssetStore {
    root: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl FsAssetStore {
    /// Opens (and creates if needed) `<root_dir>/<bucket>`.
    pub async fn new(root_dir: &str, bucket: &str, public_base_url: &str) -> AssetResult<Self> {
        let root = Path::new(root_dir).join(bucket);
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Directory holding the bucket's blobs.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> AssetResult<PathBuf> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(name = "fs-asset-upload", skip(self, bytes, _content_type))]
    async fn upload(&self, path: &str, bytes: Bytes, _content_type: &str) -> AssetResult<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        // Never overwrite an existing blob.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => AssetError::AlreadyExists(path.to_string()),
                _ => AssetError::Io(e),
            })?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        debug!(bytes = bytes.len(), "Stored asset");
        Ok(self.public_url(path))
    }

    #[instrument(name = "fs-asset-remove", skip(self))]
    async fn remove(&self, paths: &[String]) -> AssetResult<()> {
        let targets = paths
            .iter()
            .map(|p| self.resolve(p))
            .collect::<AssetResult<Vec<_>>>()?;
        for target in targets {
            match fs::remove_file(&target).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %target.display(), "Asset already absent");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }
}
