use clap::Parser;
use qrmenu_common::QMAppContext;
use qrmenu_error::{QMError, QMResult};
use qrmenu_models::constants::DEFAULT_CONFIG_FILE_NAME;
use qrmenu_storage::QMDbManager;
use qrmenu_web::QMWebServer;
use std::{env::current_dir, path::PathBuf};

/// QR Menu - admin console and public menu pages for restaurants
#[derive(Parser)]
#[command(name = "qrmenu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "QR Menu", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, 'qrmenu.toml' in the current working directory is
    /// used when present.
    #[arg(short, long, env = "QM_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> QMResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| QMError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    let ctx =
        QMAppContext::init::<QMDbManager, QMWebServer>(config_path.to_string_lossy().to_string())
            .await?;

    ctx.run().await
}
