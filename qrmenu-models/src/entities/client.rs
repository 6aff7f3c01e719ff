//! `SeaORM` Entity for the client (tenant) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Public lookup key, `^[a-z0-9-]+$`.
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_keywords: Option<String>,
    pub pdf_url: Option<String>,
    pub logo_url: Option<String>,
    pub og_image_url: Option<String>,
    pub favicon_url: Option<String>,
    /// Business schema object, rebuilt in full on every save.
    pub json_ld: Option<Json>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
