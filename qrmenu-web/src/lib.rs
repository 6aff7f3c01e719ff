//! HTTP surface: admin API, public landing pages, PDF passthrough and
//! filesystem asset serving.
mod api;
mod middleware;
mod render;

#[cfg(test)]
mod test_support;

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Compress, Logger, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use async_trait::async_trait;
use middleware::cors::middleware;
use qrmenu_core::ClientService;
use render::Pages;
use qrmenu_error::{init::InitContextError, QMError, QMResult};
use qrmenu_models::{
    settings::{AssetStoreType, Settings},
    AssetStore, ClientStore, WebServer,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    settings: Settings,
    clients: ClientService,
    /// Upstream client of the PDF passthrough.
    http: reqwest::Client,
    /// Bucket directory served under `/<bucket>/`, filesystem backend only.
    asset_root: Option<PathBuf>,
    pages: Arc<Pages>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        clients: Arc<dyn ClientStore>,
        assets: Arc<dyn AssetStore>,
    ) -> QMResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.proxy.timeout_ms))
            .build()
            .map_err(|e| QMError::from(format!("Failed to build http client: {e}")))?;

        let asset_root = match settings.assets.r#type {
            AssetStoreType::Filesystem => Some(
                PathBuf::from(&settings.assets.root_dir).join(&settings.assets.bucket),
            ),
            AssetStoreType::Supabase => None,
        };

        let pages = Pages::new()
            .map_err(|e| QMError::from(format!("Failed to register page templates: {e}")))?;

        Ok(Self {
            clients: ClientService::new(settings.clone(), clients, assets),
            settings,
            http,
            asset_root,
            pages: Arc::new(pages),
        })
    }
}

/// Registers every route. Order matters: fixed root paths and the API scope
/// must win over the catch-all `/{slug}` page routes.
pub(crate) fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(Data::new(state.clone()))
        .configure(api::configure_public_routes);

    if state.asset_root.is_some() {
        api::configure_asset_routes(cfg, &state.settings.assets.bucket);
    }

    cfg.service(web::scope(&state.settings.web.router_prefix).configure(api::configure_routes))
        .configure(api::configure_page_routes);
}

#[derive(Clone)]
pub struct QMWebServer {
    /// Server handle for graceful shutdown
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl QMWebServer {
    fn create_server(settings: &Settings, state: AppState) -> QMResult<Server> {
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let cors_config = settings.web.cors.clone();

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(middleware(&cors_config))
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(NormalizePath::trim())
                .configure(|cfg| configure_app(cfg, &state))
        });
        if settings.web.workers > 0 {
            server = server.workers(settings.web.workers);
        }

        server = server
            .bind(&addr)
            .map_err(|e| QMError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;

        info!("Web server listening on {addr}");
        Ok(server.run())
    }
}

#[async_trait]
impl WebServer for QMWebServer {
    #[instrument(name = "init-web-server", skip_all)]
    async fn init(
        settings: &Settings,
        clients: Arc<dyn ClientStore>,
        assets: Arc<dyn AssetStore>,
    ) -> QMResult<Arc<Self>, InitContextError> {
        let state = AppState::new(settings.clone(), clients, assets)
            .map_err(|e| InitContextError::Primitive(e.to_string()))?;
        let server = Self::create_server(settings, state).map_err(|e| {
            InitContextError::Primitive(format!("Failed to create web server: {e}"))
        })?;
        let server_handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error=%e, "Web server failed to start");
            }
        });

        Ok(Arc::new(QMWebServer {
            server: Arc::new(Mutex::new(Some(server_handle))),
        }))
    }

    #[instrument(name = "web-server-stop", skip_all)]
    async fn stop(&self) -> QMResult<()> {
        info!("Stopping web server...");
        let mut server_guard = self.server.lock().await;
        if let Some(handle) = server_guard.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped");

        Ok(())
    }
}
