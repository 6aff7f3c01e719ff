//! Application lifecycle: settings, logging, storage, web server and
//! graceful shutdown.
mod logger;

pub use logger::Logger;
pub use qrmenu_error::{QMError, QMResult};

use qrmenu_models::{
    constants::DATA_DIR, settings::Settings, AssetStore, ClientStore, DbManager, WebServer,
};
use qrmenu_repository::ClientRepository;
use qrmenu_storage::build_asset_store;
use std::{
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
#[cfg(windows)]
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{info, instrument, span, warn, Level};

pub struct QMAppContext {
    settings: Settings,
    logger: Logger,
    db_manager: Arc<dyn DbManager>,
    clients: Arc<dyn ClientStore>,
    assets: Arc<dyn AssetStore>,
    web_server: Arc<dyn WebServer>,
    shutting_down: AtomicBool,
    shutdown_token: CancellationToken,
}

impl QMAppContext {
    /// Initializes every component in order: settings, runtime dir, logger,
    /// data dir, database (with migrations), asset store, web server.
    pub async fn init<D, W>(config: String) -> QMResult<Self>
    where
        D: DbManager,
        W: WebServer,
    {
        let mut logger = Logger::new(if cfg!(debug_assertions) {
            Some(Level::DEBUG)
        } else {
            Some(Level::INFO)
        });

        // runtime_dir must be applied before the logger opens ./logs
        let settings = Settings::new(config)?;
        apply_runtime_dir(&settings.general.runtime_dir)?;
        logger.initialize()?;

        let span = span!(Level::INFO, "init-app");
        let _guard = span.enter();

        ensure_runtime_directories()?;

        let db_manager: Arc<dyn DbManager> = D::init(&settings).await?;
        info!("Database initialized successfully.");

        let clients: Arc<dyn ClientStore> =
            Arc::new(ClientRepository::new(db_manager.get_connection()?));

        let assets = build_asset_store(&settings).await?;
        info!("Asset store initialized successfully.");

        let web_server: Arc<dyn WebServer> =
            W::init(&settings, Arc::clone(&clients), Arc::clone(&assets)).await?;
        info!("Web server initialized successfully.");

        Ok(QMAppContext {
            settings,
            logger,
            db_manager,
            clients,
            assets,
            web_server,
            shutting_down: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
        })
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn clients(&self) -> Arc<dyn ClientStore> {
        Arc::clone(&self.clients)
    }

    #[inline]
    pub fn assets(&self) -> Arc<dyn AssetStore> {
        Arc::clone(&self.assets)
    }

    #[inline]
    pub fn change_log_level(&self, level: Level) {
        self.logger.set_level(level);
    }

    /// Requests shutdown without waiting for a signal.
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }

    /// Blocks until a shutdown signal arrives, then stops every component.
    pub async fn run(&self) -> QMResult<()> {
        self.wait_for_shutdown().await?;
        self.graceful_shutdown().await
    }

    async fn wait_for_shutdown(&self) -> QMResult<()> {
        let shutdown_token = self.shutdown_token.clone();

        #[cfg(unix)]
        {
            let mut sigterm = signal(SignalKind::terminate())
                .map_err(|e| QMError::from(format!("Failed to register SIGTERM handler: {e}")))?;
            let mut sigint = signal(SignalKind::interrupt())
                .map_err(|e| QMError::from(format!("Failed to register SIGINT handler: {e}")))?;

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        #[cfg(windows)]
        {
            tokio::select! {
                _ = ctrl_c() => {
                    info!("Received ctrl-c signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        Ok(())
    }

    #[instrument(name = "graceful-shutdown", skip_all)]
    pub async fn graceful_shutdown(&self) -> QMResult<()> {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Starting graceful shutdown...");

        // the server drains in-flight requests before the pool goes away
        if let Err(e) = self.web_server.stop().await {
            warn!("Web server stop failed: {e}");
        }

        let tracker = TaskTracker::new();
        let db_manager = Arc::clone(&self.db_manager);
        tracker.spawn(async move {
            let _ = db_manager.close().await;
        });
        tracker.close();
        tracker.wait().await;

        info!("Graceful shutdown completed");
        Ok(())
    }
}

/// Switches the process working directory so every relative path
/// (`./data`, `./logs`) resolves under the configured runtime root.
fn apply_runtime_dir(runtime_dir: &str) -> QMResult<()> {
    let dir = runtime_dir.trim();
    if dir.is_empty() || dir == "." {
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| QMError::from(format!("Failed to create runtime_dir {}: {}", dir, e)))?;

    std::env::set_current_dir(dir).map_err(|e| {
        QMError::from(format!(
            "Failed to set current_dir to runtime_dir {}: {}",
            dir, e
        ))
    })?;

    Ok(())
}

fn ensure_runtime_directories() -> QMResult<()> {
    let dir = Path::new(DATA_DIR);
    std::fs::create_dir_all(dir).map_err(|e| {
        QMError::from(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })
}
