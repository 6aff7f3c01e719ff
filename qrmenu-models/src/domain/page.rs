//! Head metadata of a client's public landing page.

use serde::Serialize;
use serde_json::Value as Json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconLink {
    pub rel: &'static str,
    pub href: String,
    pub sizes: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub icons: Vec<IconLink>,
    pub og_title: String,
    /// Social preview image, `None` when the client has neither og image nor logo.
    pub og_image: Option<String>,
    /// Embedded verbatim as `application/ld+json`.
    pub json_ld: Option<Json>,
}
