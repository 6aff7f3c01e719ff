//! Asset (blob) store backends.
//!
//! Both backends address blobs by a bucket-relative path such as
//! `logos/1718000000000-logo.png` and hand out public URLs that contain
//! `/<bucket>/<path>`, which is what the deletion flow parses back.

pub mod fs;
pub mod supabase;

use qrmenu_error::{asset::AssetError, init::InitContextError, AssetResult, QMResult};
use qrmenu_models::{
    settings::{AssetStoreType, Settings},
    AssetStore,
};
use std::{
    path::{Component, Path},
    sync::Arc,
};
use tracing::{info, instrument};

pub use fs::FsAssetStore;
pub use supabase::SupabaseAssetStore;

/// Build the configured asset store backend.
#[instrument(name = "init-asset-store", skip_all)]
pub async fn build_asset_store(
    settings: &Settings,
) -> QMResult<Arc<dyn AssetStore>, InitContextError> {
    let assets = &settings.assets;
    let store: Arc<dyn AssetStore> = match assets.r#type {
        AssetStoreType::Filesystem => Arc::new(
            FsAssetStore::new(&assets.root_dir, &assets.bucket, &assets.public_base_url)
                .await
                .map_err(|e| {
                    InitContextError::Primitive(format!("Failed to init filesystem assets: {e}"))
                })?,
        ),
        AssetStoreType::Supabase => Arc::new(
            SupabaseAssetStore::new(&assets.supabase, &assets.bucket).map_err(|e| {
                InitContextError::Primitive(format!("Failed to init supabase assets: {e}"))
            })?,
        ),
    };
    info!(
        "Asset store initialized: {:?} (bucket: {})",
        assets.r#type, assets.bucket
    );
    Ok(store)
}

/// Reject paths that are empty, absolute, or step outside the bucket.
pub fn validate_path(path: &str) -> AssetResult<()> {
    if path.is_empty() || path.contains('\\') {
        return Err(AssetError::InvalidPath(path.to_string()));
    }
    let all_normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !all_normal {
        return Err(AssetError::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("pdfs/1-menu.pdf").is_ok());
        assert!(validate_path("favicons/1-icon.png").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("/etc/passwd").is_err());
        assert!(validate_path("pdfs/../../secret").is_err());
        assert!(validate_path("./pdfs/a.pdf").is_err());
        assert!(validate_path("pdfs\\a.pdf").is_err());
    }
}
