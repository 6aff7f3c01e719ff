//! Turns a submitted manage form into asset-store mutations plus one complete
//! row payload.

use crate::{
    naming::{extract_storage_path, is_valid_slug, normalize_slug, storage_path},
    schema::build_business_schema,
};
use chrono::Utc;
use futures::future::try_join_all;
use qrmenu_error::{client::ClientError, ClientResult};
use qrmenu_models::{
    domain::prelude::{AssetSlot, ClientForm, ClientPayload, PendingAssets, PendingUpload},
    entities::prelude::ClientModel,
    settings::Schema,
    AssetStore,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

pub struct Reconciler {
    assets: Arc<dyn AssetStore>,
    schema: Schema,
}

impl Reconciler {
    pub fn new(assets: Arc<dyn AssetStore>, schema: Schema) -> Self {
        Self { assets, schema }
    }

    /// Validates `form`, then settles the four asset slots concurrently and
    /// assembles the payload for one insert (`previous` absent) or one update.
    ///
    /// Validation failures happen before any store call. The first failed
    /// upload aborts the save; replaced blobs already deleted stay deleted.
    #[instrument(name = "reconcile-client", skip_all, fields(slug = %form.slug))]
    pub async fn reconcile(
        &self,
        previous: Option<&ClientModel>,
        form: &ClientForm,
        mut pending: PendingAssets,
    ) -> ClientResult<ClientPayload> {
        let slug = validate_form(form)?;

        let slots = AssetSlot::ALL.into_iter().map(|slot| {
            let previous_url = previous.and_then(|p| slot.url_of(p));
            self.reconcile_slot(slot, previous_url, pending.take(slot))
        });
        let urls = try_join_all(slots).await?;

        let mut payload = ClientPayload {
            slug,
            name: form.name.trim().to_string(),
            description: Some(form.description.trim().to_string()),
            seo_title: form.seo_title.clone(),
            seo_keywords: form.keywords.clone(),
            ..Default::default()
        };
        for (slot, url) in urls {
            payload.set_url(slot, url);
        }

        let schema = build_business_schema(
            form,
            payload.url(AssetSlot::OgImage),
            payload.url(AssetSlot::Logo),
            &self.schema,
        );
        payload.json_ld = Some(serde_json::to_value(&schema)?);

        Ok(payload)
    }

    async fn reconcile_slot(
        &self,
        slot: AssetSlot,
        previous_url: Option<&str>,
        upload: Option<PendingUpload>,
    ) -> ClientResult<(AssetSlot, Option<String>)> {
        let Some(upload) = upload else {
            return Ok((slot, previous_url.map(str::to_string)));
        };

        if let Some(url) = previous_url {
            self.remove_replaced(slot, url).await;
        }

        let path = storage_path(
            slot.folder(),
            Utc::now().timestamp_millis(),
            &upload.file_name,
            slot.field_name(),
        );
        let url = self
            .assets
            .upload(&path, upload.bytes, &upload.content_type)
            .await
            .map_err(|source| ClientError::Upload {
                path: path.clone(),
                source,
            })?;
        debug!("Uploaded {slot} to {path}");

        Ok((slot, Some(url)))
    }

    /// Best effort: a failure leaves an orphaned blob behind and is only logged.
    async fn remove_replaced(&self, slot: AssetSlot, url: &str) {
        let Some(path) = extract_storage_path(url, self.assets.bucket()) else {
            warn!("Previous {slot} url is outside bucket `{}`, not removed: {url}", self.assets.bucket());
            return;
        };
        if let Err(e) = self.assets.remove(std::slice::from_ref(&path)).await {
            warn!("Failed to remove replaced {slot} `{path}`: {e}");
        }
    }
}

/// Required fields plus the normalized slug's charset. Returns the slug.
pub fn validate_form(form: &ClientForm) -> ClientResult<String> {
    let trimmed = ClientForm {
        name: form.name.trim().to_string(),
        slug: form.slug.trim().to_string(),
        description: form.description.trim().to_string(),
        ..Default::default()
    };
    trimmed
        .validate()
        .map_err(|e| ClientError::Validation(e.to_string()))?;

    let slug = normalize_slug(&form.slug);
    if !is_valid_slug(&slug) {
        return Err(ClientError::Validation(format!(
            "slug `{slug}` may only contain a-z, 0-9 and '-'"
        )));
    }
    Ok(slug)
}
