use qrmenu_error::QMResult;
use qrmenu_models::settings::Sqlite;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, instrument, log::LevelFilter};

#[instrument(name = "init_sqlite_db", skip_all)]
/// Initialize SQLite database connection with auto-creation support
/// Uses SQLite URL parameter mode=rwc for automatic file creation when auto_create is enabled
pub async fn init_db(config: &Sqlite) -> QMResult<DatabaseConnection> {
    let database_url = config.to_url();

    let mut opts = ConnectOptions::new(&database_url);
    opts.connect_timeout(Duration::from_millis(config.timeout))
        .idle_timeout(Duration::from_millis(config.idle_timeout))
        .max_lifetime(Duration::from_millis(config.max_lifetime))
        .max_connections(config.max_connections);

    #[cfg(debug_assertions)]
    {
        opts.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    }
    #[cfg(not(debug_assertions))]
    {
        opts.sqlx_logging(false)
            .sqlx_logging_level(LevelFilter::Off);
    }

    info!(
        "Connecting to SQLite database at: {} (auto_create: {})",
        config.db_path(),
        config.auto_create
    );

    let db = Database::connect(opts).await?;
    info!("Successfully connected to SQLite database");

    Ok(db)
}

/// Single-connection in-memory database. Every pooled connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub async fn init_memory_db() -> QMResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Ok(Database::connect(opts).await?)
}
