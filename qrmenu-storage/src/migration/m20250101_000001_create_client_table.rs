use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use tracing::{info, instrument};

#[derive(DeriveIden)]
pub enum Client {
    Table,
    Id,
    Slug,
    Name,
    Description,
    SeoTitle,
    SeoKeywords,
    PdfUrl,
    LogoUrl,
    OgImageUrl,
    FaviconUrl,
    JsonLd,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_client_table(manager).await?;
        create_indexes(manager).await?;
        create_sqlite_updated_at_trigger(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Client::Table).if_exists().to_owned())
            .await
    }
}

async fn create_client_table(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Client::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Client::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Client::Slug)
                        .string_len(128)
                        .not_null()
                        .comment("Public lookup key"),
                )
                .col(
                    ColumnDef::new(Client::Name)
                        .string_len(255)
                        .not_null()
                        .comment("Display name"),
                )
                .col(ColumnDef::new(Client::Description).text())
                .col(ColumnDef::new(Client::SeoTitle).string_len(255))
                .col(ColumnDef::new(Client::SeoKeywords).text())
                .col(ColumnDef::new(Client::PdfUrl).text())
                .col(ColumnDef::new(Client::LogoUrl).text())
                .col(ColumnDef::new(Client::OgImageUrl).text())
                .col(ColumnDef::new(Client::FaviconUrl).text())
                .col(
                    ColumnDef::new(Client::JsonLd)
                        .json()
                        .comment("Business schema (JSON-LD)"),
                )
                .col(
                    ColumnDef::new(Client::CreatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp())
                        .comment("Created at"),
                )
                .col(
                    ColumnDef::new(Client::UpdatedAt)
                        .timestamp()
                        .default(Expr::current_timestamp())
                        .comment("Updated at"),
                )
                .to_owned(),
        )
        .await
}

async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_index(
            Index::create()
                .name("uk_client_slug")
                .table(Client::Table)
                .col(Client::Slug)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await?;
    manager
        .create_index(
            Index::create()
                .name("idx_client_created_at")
                .table(Client::Table)
                .col(Client::CreatedAt)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

/// SQLite has no `ON UPDATE CURRENT_TIMESTAMP`; an `AFTER UPDATE` trigger bumps
/// `updated_at` unless the statement set it explicitly. The `WHEN` clause stops recursion.
#[instrument(name = "create-updated-at-trigger", skip_all)]
async fn create_sqlite_updated_at_trigger(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if manager.get_database_backend() != DatabaseBackend::Sqlite {
        return Ok(());
    }

    let sql = r#"
        CREATE TRIGGER IF NOT EXISTS "trg_client_updated_at"
        AFTER UPDATE ON "client"
        FOR EACH ROW
        WHEN NEW."updated_at" = OLD."updated_at"
        BEGIN
            UPDATE "client" SET "updated_at" = CURRENT_TIMESTAMP WHERE rowid = NEW.rowid;
        END;
    "#;
    manager
        .get_connection()
        .execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await?;
    info!("Created updated_at trigger for client table");
    Ok(())
}
