pub mod asset;
mod migration;
pub mod sql;

use async_trait::async_trait;
use qrmenu_error::{init::InitContextError, storage::StorageError, QMResult};
use qrmenu_models::{settings::Settings, DbManager};
use sea_orm::DatabaseConnection;
use sql::sqlite;
use std::sync::Arc;
use tracing::{info, instrument};

pub use asset::{build_asset_store, FsAssetStore, SupabaseAssetStore};
pub use migration::{Migrator, MigratorTrait};

/// Database manager owning the SQLite pool
pub struct QMDbManager {
    db_conn: Option<DatabaseConnection>,
}

#[async_trait]
impl DbManager for QMDbManager {
    #[inline]
    #[instrument(name = "init-db-manager", skip_all)]
    async fn init(settings: &Settings) -> QMResult<Arc<Self>, InitContextError> {
        let db_conn = {
            let db = sqlite::init_db(&settings.db.sqlite).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to init SQLite database: {e}"))
            })?;

            Migrator::up(&db, None).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to migrate SQLite database: {e}"))
            })?;

            db
        };

        let db_manager = Arc::new(QMDbManager {
            db_conn: Some(db_conn),
        });

        info!("Database manager initialized successfully");
        Ok(db_manager)
    }

    #[inline]
    fn get_connection(&self) -> QMResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[inline]
    #[instrument(name = "db_close", skip_all)]
    async fn close(&self) -> QMResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed successfully");
        Ok(())
    }
}

/// Migrated single-connection in-memory database.
pub async fn init_memory_db() -> QMResult<DatabaseConnection> {
    let db = sqlite::init_memory_db().await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DbBackend, Statement};

    #[tokio::test]
    async fn test_migration_creates_client_table_with_unique_slug() {
        let db = init_memory_db().await.unwrap();

        db.execute(Statement::from_string(
            DbBackend::Sqlite,
            "INSERT INTO client (slug, name) VALUES ('sweet-tooth', 'Sweet Tooth')".to_string(),
        ))
        .await
        .unwrap();

        let dup = db
            .execute(Statement::from_string(
                DbBackend::Sqlite,
                "INSERT INTO client (slug, name) VALUES ('sweet-tooth', 'Other')".to_string(),
            ))
            .await;
        assert!(dup.is_err());
    }
}
