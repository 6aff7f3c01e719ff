//! Head metadata of the public landing page.

use qrmenu_models::{
    domain::prelude::{IconLink, PageMetadata},
    entities::prelude::ClientModel,
};

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Derives the page head from a stored record. Missing optional fields only
/// drop the matching tags.
pub fn page_metadata(model: &ClientModel, fallback_icon: &str) -> PageMetadata {
    let title = non_empty(&model.seo_title).unwrap_or_else(|| format!("{} | View Menu", model.name));
    let icon = non_empty(&model.favicon_url).unwrap_or_else(|| fallback_icon.to_string());

    let icons = vec![
        IconLink { rel: "icon", href: icon.clone(), sizes: Some("32x32") },
        IconLink { rel: "icon", href: icon.clone(), sizes: Some("192x192") },
        IconLink { rel: "icon", href: icon.clone(), sizes: Some("512x512") },
        IconLink { rel: "shortcut icon", href: icon.clone(), sizes: None },
        IconLink { rel: "apple-touch-icon", href: icon, sizes: Some("180x180") },
    ];

    PageMetadata {
        title,
        description: non_empty(&model.description),
        keywords: non_empty(&model.seo_keywords),
        icons,
        og_title: model.name.clone(),
        og_image: non_empty(&model.og_image_url).or_else(|| non_empty(&model.logo_url)),
        json_ld: model.json_ld.clone(),
    }
}
