use crate::{deletion::delete_client, metadata::page_metadata, reconciler::Reconciler};
use qrmenu_error::{client::ClientError, ClientResult};
use qrmenu_models::{
    domain::prelude::{ClientForm, ClientFormState, PageMetadata, PendingAssets, QrTarget},
    entities::prelude::ClientModel,
    settings::Settings,
    AssetStore, ClientStore,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Client record lifecycle used by the admin API and the public pages.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    assets: Arc<dyn AssetStore>,
    reconciler: Arc<Reconciler>,
    settings: Settings,
}

impl ClientService {
    pub fn new(
        settings: Settings,
        clients: Arc<dyn ClientStore>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        let reconciler = Arc::new(Reconciler::new(
            Arc::clone(&assets),
            settings.schema.clone(),
        ));
        Self {
            clients,
            assets,
            reconciler,
            settings,
        }
    }

    #[instrument(name = "client-create", skip_all)]
    pub async fn create(&self, form: ClientForm, pending: PendingAssets) -> ClientResult<ClientModel> {
        let payload = self.reconciler.reconcile(None, &form, pending).await?;
        let model = self.clients.insert(payload).await?;
        info!("Client created: id={}, slug={}", model.id, model.slug);
        Ok(model)
    }

    #[instrument(name = "client-edit", skip(self, form, pending))]
    pub async fn update(
        &self,
        id: i32,
        form: ClientForm,
        pending: PendingAssets,
    ) -> ClientResult<ClientModel> {
        let previous = self.get(id).await?;
        let payload = self
            .reconciler
            .reconcile(Some(&previous), &form, pending)
            .await?;
        let model = self.clients.update(id, payload).await?;
        info!("Client updated: id={}, slug={}", model.id, model.slug);
        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> ClientResult<()> {
        let model = self.get(id).await?;
        delete_client(self.clients.as_ref(), self.assets.as_ref(), &model).await
    }

    pub async fn list(&self) -> ClientResult<Vec<ClientModel>> {
        Ok(self.clients.list().await?)
    }

    pub async fn get(&self, id: i32) -> ClientResult<ClientModel> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("client {id}")))
    }

    /// Manage-form state for editing record `id`.
    pub async fn form_state(&self, id: i32) -> ClientResult<ClientFormState> {
        let model = self.get(id).await?;
        Ok(ClientFormState::from_model(
            &model,
            &self.settings.schema.default_price_range,
        ))
    }

    /// The public page URL encoded in the client's QR code.
    pub async fn qr(&self, id: i32) -> ClientResult<QrTarget> {
        let model = self.get(id).await?;
        Ok(QrTarget {
            url: self.settings.web.page_url(&model.slug),
            slug: model.slug,
        })
    }

    pub async fn find_by_slug(&self, slug: &str) -> ClientResult<Option<ClientModel>> {
        Ok(self.clients.find_by_slug(slug).await?)
    }

    /// Record plus derived head metadata for the public page, `None` when no
    /// client owns `slug`.
    pub async fn public_page(&self, slug: &str) -> ClientResult<Option<(ClientModel, PageMetadata)>> {
        let Some(model) = self.find_by_slug(slug).await? else {
            return Ok(None);
        };
        let metadata = page_metadata(&model, &self.settings.proxy.fallback_icon_url);
        Ok(Some((model, metadata)))
    }

    /// Stored menu PDF url of `slug`, `None` when the client or its PDF is missing.
    pub async fn pdf_url(&self, slug: &str) -> ClientResult<Option<String>> {
        Ok(self
            .find_by_slug(slug)
            .await?
            .and_then(|m| m.pdf_url)
            .filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pdf, sample_model, MemoryAssetStore, MemoryClientStore};
    use qrmenu_error::storage::StorageError;
    use qrmenu_models::domain::prelude::AssetSlot;

    fn service(
        rows: Vec<ClientModel>,
    ) -> (ClientService, Arc<MemoryClientStore>, Arc<MemoryAssetStore>) {
        let clients = Arc::new(MemoryClientStore::with_rows(rows));
        let assets = Arc::new(MemoryAssetStore::default());
        let service = ClientService::new(Settings::default(), clients.clone(), assets.clone());
        (service, clients, assets)
    }

    fn form(slug: &str) -> ClientForm {
        ClientForm {
            name: "Sweet Tooth".into(),
            slug: slug.into(),
            description: "Cakes and more".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_inserts_reconciled_payload() {
        let (service, clients, _) = service(vec![]);
        let mut pending = PendingAssets::default();
        pending.set(AssetSlot::Pdf, pdf("menu.pdf"));

        let model = service.create(form("Sweet Tooth"), pending).await.unwrap();

        assert_eq!(model.slug, "sweet-tooth");
        assert!(model.pdf_url.unwrap().contains("/client-assets/pdfs/"));
        assert_eq!(clients.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (service, _, assets) = service(vec![]);
        let err = service
            .update(9, form("x"), PendingAssets::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        assert!(assets.uploaded().is_empty());
    }

    #[tokio::test]
    async fn test_store_error_surfaces_verbatim() {
        let (service, clients, _) = service(vec![]);
        clients.fail_writes("UNIQUE constraint failed: client.slug");

        let err = service
            .create(form("dup"), PendingAssets::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Storage(StorageError::DBError(_))));
        assert!(err.to_string().contains("UNIQUE constraint failed: client.slug"));
    }

    #[tokio::test]
    async fn test_update_rewrites_slug_and_keeps_assets() {
        let previous = sample_model(4, "sweet-tooth");
        let (service, _, _) = service(vec![previous.clone()]);

        let model = service
            .update(4, form("Sweet Tooth Surat"), PendingAssets::default())
            .await
            .unwrap();
        assert_eq!(model.slug, "sweet-tooth-surat");
        assert_eq!(model.pdf_url, previous.pdf_url);
    }

    #[tokio::test]
    async fn test_delete_and_lookups() {
        let (service, clients, assets) = service(vec![sample_model(4, "sweet-tooth")]);

        let state = service.form_state(4).await.unwrap();
        assert_eq!(state.form.phone.as_deref(), Some("+91 99999"));
        assert_eq!(state.form.price_range.as_deref(), Some("₹300 - ₹2500"));

        let qr = service.qr(4).await.unwrap();
        assert_eq!(qr.url, "http://localhost:3000/sweet-tooth");

        assert!(service.public_page("sweet-tooth").await.unwrap().is_some());
        assert!(service.public_page("nope").await.unwrap().is_none());
        assert_eq!(
            service.pdf_url("sweet-tooth").await.unwrap().as_deref(),
            Some("https://x/client-assets/pdfs/1-old.pdf")
        );

        service.delete(4).await.unwrap();
        assert_eq!(assets.removed()[0].len(), 4);
        assert_eq!(clients.deleted(), vec![4]);
        assert!(matches!(service.delete(4).await, Err(ClientError::NotFound(_))));
    }
}
