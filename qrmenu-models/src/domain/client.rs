//! Client (tenant) domain models.
//!
//! A client is one restaurant with a public landing page at `/<slug>`. Its four
//! branding assets live in the asset store; the row only keeps their public URLs.

use crate::entities::client::{ActiveModel, Model as ClientModel};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sea_orm::DeriveIntoActiveModel;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;
use validator::Validate;

/// One of the four asset slots a client can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSlot {
    Pdf,
    Logo,
    OgImage,
    Favicon,
}

impl AssetSlot {
    pub const ALL: [AssetSlot; 4] = [
        AssetSlot::Pdf,
        AssetSlot::Logo,
        AssetSlot::OgImage,
        AssetSlot::Favicon,
    ];

    /// Fixed storage folder for the slot.
    #[inline]
    pub fn folder(&self) -> &'static str {
        match self {
            AssetSlot::Pdf => "pdfs",
            AssetSlot::Logo => "logos",
            AssetSlot::OgImage => "social",
            AssetSlot::Favicon => "favicons",
        }
    }

    /// Multipart field name carrying a new file for the slot.
    #[inline]
    pub fn field_name(&self) -> &'static str {
        match self {
            AssetSlot::Pdf => "pdf",
            AssetSlot::Logo => "logo",
            AssetSlot::OgImage => "og_image",
            AssetSlot::Favicon => "favicon",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        AssetSlot::ALL
            .into_iter()
            .find(|slot| slot.field_name() == name)
    }

    /// The slot's current URL on a stored record, `None` when absent or empty.
    pub fn url_of<'a>(&self, model: &'a ClientModel) -> Option<&'a str> {
        let url = match self {
            AssetSlot::Pdf => model.pdf_url.as_deref(),
            AssetSlot::Logo => model.logo_url.as_deref(),
            AssetSlot::OgImage => model.og_image_url.as_deref(),
            AssetSlot::Favicon => model.favicon_url.as_deref(),
        };
        url.filter(|u| !u.is_empty())
    }
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Text fields of the manage form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Slug source; normalized at save time.
    #[validate(length(min = 1, message = "slug is required"))]
    pub slug: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub seo_title: Option<String>,
    pub keywords: Option<String>,
    pub phone: Option<String>,
    pub price_range: Option<String>,
    pub address: Option<String>,
}

impl ClientForm {
    /// Assign a text field by its multipart name. Unknown names are ignored.
    ///
    /// The slug is kept verbatim for normalization. Other values are trimmed
    /// and blank optional values are stored as `None`.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        if name == "slug" {
            self.slug = value;
            return true;
        }
        let value = value.trim().to_string();
        let optional = (!value.is_empty()).then(|| value.clone());
        match name {
            "name" => self.name = value,
            "description" => self.description = value,
            "seo_title" | "seoTitle" => self.seo_title = optional,
            "keywords" | "seo_keywords" => self.keywords = optional,
            "phone" => self.phone = optional,
            "price_range" | "priceRange" => self.price_range = optional,
            "address" => self.address = optional,
            _ => return false,
        }
        true
    }
}

/// A newly submitted file for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Up to one new file per slot. An absent slot keeps its previous URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAssets {
    pub pdf: Option<PendingUpload>,
    pub logo: Option<PendingUpload>,
    pub og_image: Option<PendingUpload>,
    pub favicon: Option<PendingUpload>,
}

impl PendingAssets {
    pub fn set(&mut self, slot: AssetSlot, upload: PendingUpload) {
        *self.slot_mut(slot) = Some(upload);
    }

    pub fn take(&mut self, slot: AssetSlot) -> Option<PendingUpload> {
        self.slot_mut(slot).take()
    }

    fn slot_mut(&mut self, slot: AssetSlot) -> &mut Option<PendingUpload> {
        match slot {
            AssetSlot::Pdf => &mut self.pdf,
            AssetSlot::Logo => &mut self.logo,
            AssetSlot::OgImage => &mut self.og_image,
            AssetSlot::Favicon => &mut self.favicon,
        }
    }
}

/// Complete row payload produced by a save; every persisted column is set.
#[derive(Clone, Debug, Default, PartialEq, DeriveIntoActiveModel)]
pub struct ClientPayload {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_keywords: Option<String>,
    pub pdf_url: Option<String>,
    pub logo_url: Option<String>,
    pub og_image_url: Option<String>,
    pub favicon_url: Option<String>,
    pub json_ld: Option<Json>,
}

impl ClientPayload {
    pub fn url(&self, slot: AssetSlot) -> Option<&str> {
        match slot {
            AssetSlot::Pdf => self.pdf_url.as_deref(),
            AssetSlot::Logo => self.logo_url.as_deref(),
            AssetSlot::OgImage => self.og_image_url.as_deref(),
            AssetSlot::Favicon => self.favicon_url.as_deref(),
        }
    }

    pub fn set_url(&mut self, slot: AssetSlot, url: Option<String>) {
        let url = url.filter(|u| !u.is_empty());
        match slot {
            AssetSlot::Pdf => self.pdf_url = url,
            AssetSlot::Logo => self.logo_url = url,
            AssetSlot::OgImage => self.og_image_url = url,
            AssetSlot::Favicon => self.favicon_url = url,
        }
    }
}

/// `PostalAddress` node of the business schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "streetAddress")]
    pub street_address: String,
    #[serde(rename = "addressCountry")]
    pub address_country: String,
}

/// Structured-data (JSON-LD) object describing the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub telephone: String,
    #[serde(rename = "priceRange")]
    pub price_range: String,
    pub address: PostalAddress,
}

/// Dashboard listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_keywords: Option<String>,
    pub pdf_url: Option<String>,
    pub logo_url: Option<String>,
    pub og_image_url: Option<String>,
    pub favicon_url: Option<String>,
    pub json_ld: Option<Json>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ClientModel> for ClientInfo {
    fn from(model: ClientModel) -> Self {
        ClientInfo {
            id: model.id,
            slug: model.slug,
            name: model.name,
            description: model.description,
            seo_title: model.seo_title,
            seo_keywords: model.seo_keywords,
            pdf_url: model.pdf_url,
            logo_url: model.logo_url,
            og_image_url: model.og_image_url,
            favicon_url: model.favicon_url,
            json_ld: model.json_ld,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Manage-form state prefilled from a stored record for editing.
///
/// Phone, address and price range only live inside `json_ld`, so they are read
/// back out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFormState {
    pub id: i32,
    #[serde(flatten)]
    pub form: ClientForm,
    pub pdf_url: Option<String>,
    pub logo_url: Option<String>,
    pub og_image_url: Option<String>,
    pub favicon_url: Option<String>,
}

impl ClientFormState {
    pub fn from_model(model: &ClientModel, default_price_range: &str) -> Self {
        let schema = model.json_ld.as_ref();
        let text = |value: Option<&Json>| {
            value
                .and_then(Json::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let form = ClientForm {
            name: model.name.clone(),
            slug: model.slug.clone(),
            description: model.description.clone().unwrap_or_default(),
            seo_title: model.seo_title.clone(),
            keywords: model.seo_keywords.clone(),
            phone: text(schema.and_then(|s| s.get("telephone"))),
            price_range: text(schema.and_then(|s| s.get("priceRange")))
                .or_else(|| Some(default_price_range.to_string())),
            address: text(
                schema
                    .and_then(|s| s.get("address"))
                    .and_then(|a| a.get("streetAddress")),
            ),
        };

        ClientFormState {
            id: model.id,
            form,
            pdf_url: model.pdf_url.clone(),
            logo_url: model.logo_url.clone(),
            og_image_url: model.og_image_url.clone(),
            favicon_url: model.favicon_url.clone(),
        }
    }
}

/// Target of the dashboard QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrTarget {
    pub slug: String,
    pub url: String,
}

/// `?id=<id>` selector of the manage form's edit mode.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditQuery {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i32,
}
