//! Repository for client (tenant) rows.

use async_trait::async_trait;
use qrmenu_error::{storage::StorageError, StorageResult};
use qrmenu_models::{
    domain::prelude::ClientPayload,
    entities::prelude::{Client, ClientActiveModel, ClientColumn, ClientModel},
    ClientStore,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Order, QueryFilter, QueryOrder, Set,
};
use tracing::instrument;

#[derive(Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<ClientModel>> {
        Ok(Client::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_slug(&self, slug: &str) -> StorageResult<Option<ClientModel>> {
        Ok(Client::find()
            .filter(ClientColumn::Slug.eq(slug))
            .one(&self.db)
            .await?)
    }

    async fn list(&self) -> StorageResult<Vec<ClientModel>> {
        Ok(Client::find()
            .order_by(ClientColumn::CreatedAt, Order::Desc)
            .order_by(ClientColumn::Id, Order::Desc)
            .all(&self.db)
            .await?)
    }

    #[instrument(name = "client-insert", skip_all, fields(slug = %payload.slug))]
    async fn insert(&self, payload: ClientPayload) -> StorageResult<ClientModel> {
        let active: ClientActiveModel = payload.into_active_model();
        Ok(active.insert(&self.db).await?)
    }

    #[instrument(name = "client-update", skip(self, payload), fields(slug = %payload.slug))]
    async fn update(&self, id: i32, payload: ClientPayload) -> StorageResult<ClientModel> {
        let active = ClientActiveModel {
            id: Set(id),
            ..payload.into_active_model()
        };
        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotUpdated) => Err(StorageError::EntityNotFound(format!("client {id}"))),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(name = "client-delete", skip(self))]
    async fn delete(&self, id: i32) -> StorageResult<()> {
        let _ = Client::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
