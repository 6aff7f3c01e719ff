use crate::naming::extract_storage_path;
use qrmenu_error::ClientResult;
use qrmenu_models::{
    domain::prelude::AssetSlot, entities::prelude::ClientModel, AssetStore, ClientStore,
};
use tracing::{info, instrument, warn};

/// Bucket-relative paths of every asset a record references.
pub fn asset_paths(model: &ClientModel, bucket: &str) -> Vec<String> {
    AssetSlot::ALL
        .iter()
        .filter_map(|slot| {
            let url = slot.url_of(model)?;
            let path = extract_storage_path(url, bucket);
            if path.is_none() {
                warn!("Client {} {slot} url is outside bucket `{bucket}`: {url}", model.id);
            }
            path
        })
        .collect()
}

/// Removes the record's blobs in one batch call, then the row.
///
/// A failed batch remove only leaves orphans behind, so the row goes anyway.
#[instrument(name = "delete-client", skip_all, fields(id = model.id, slug = %model.slug))]
pub async fn delete_client(
    clients: &dyn ClientStore,
    assets: &dyn AssetStore,
    model: &ClientModel,
) -> ClientResult<()> {
    let paths = asset_paths(model, assets.bucket());
    if !paths.is_empty() {
        if let Err(e) = assets.remove(&paths).await {
            warn!("Failed to remove {} asset(s) {:?}: {e}", paths.len(), paths);
        }
    }

    clients.delete(model.id).await?;
    info!("Client deleted");
    Ok(())
}
