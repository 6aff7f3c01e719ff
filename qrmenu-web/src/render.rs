//! Server-side HTML for the public landing page.

use handlebars::{Handlebars, RenderError, TemplateError};
use qrmenu_models::{domain::prelude::PageMetadata, entities::prelude::ClientModel};
use serde_json::json;

const LANDING: &str = "landing";
const NOT_FOUND: &str = "not_found";

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#f2f2f2}\
main{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;gap:2rem;padding:.75rem 1.5rem}\
img.logo{width:100%;max-width:16rem;object-fit:contain}\
h1{font-size:2.25rem;color:#603f36}\
a.menu{background:#603f36;color:#fff;font-weight:700;font-size:1.125rem;padding:1rem 2rem;border-radius:.25rem;text-decoration:none;text-transform:uppercase;letter-spacing:.025em}";

const LANDING_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{meta.title}}</title>
{{#if meta.description}}<meta name="description" content="{{meta.description}}">
{{/if}}{{#if meta.keywords}}<meta name="keywords" content="{{meta.keywords}}">
{{/if}}{{#each meta.icons}}<link rel="{{rel}}" href="{{href}}"{{#if sizes}} sizes="{{sizes}}"{{/if}}>
{{/each}}<meta property="og:title" content="{{meta.og_title}}">
{{#if meta.description}}<meta property="og:description" content="{{meta.description}}">
{{/if}}{{#if meta.og_image}}<meta property="og:image" content="{{meta.og_image}}">
{{/if}}<meta property="og:type" content="website">
{{#if json_ld}}<script type="application/ld+json">{{{json_ld}}}</script>
{{/if}}<style>{{{style}}}</style>
</head>
<body>
<main>
{{#if logo_url}}<img class="logo" src="{{logo_url}}" alt="{{name}} Logo" width="200" height="200">
{{else}}<h1>{{name}}</h1>
{{/if}}{{#if has_pdf}}<a class="menu" href="/{{slug}}/pdf" target="_blank" rel="noopener">View Our Menu</a>
{{/if}}</main>
</body>
</html>
"#;

const NOT_FOUND_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<title>Not Found</title>
<style>{{{style}}}</style>
</head>
<body>
<main>
<p>Client Not Found</p>
</main>
</body>
</html>
"#;

/// Compiled page templates, registered once per server.
pub(crate) struct Pages {
    hb: Handlebars<'static>,
}

impl Pages {
    pub(crate) fn new() -> Result<Self, TemplateError> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(false);
        hb.register_template_string(LANDING, LANDING_TEMPLATE)?;
        hb.register_template_string(NOT_FOUND, NOT_FOUND_TEMPLATE)?;
        Ok(Self { hb })
    }

    /// Landing page with full head metadata and the embedded business schema.
    pub(crate) fn landing_page(
        &self,
        model: &ClientModel,
        meta: &PageMetadata,
    ) -> Result<String, RenderError> {
        let data = json!({
            "meta": meta,
            "json_ld": meta.json_ld.as_ref().map(|v| escape_script_json(&v.to_string())),
            "style": STYLE,
            "name": model.name,
            "slug": model.slug,
            "logo_url": model.logo_url.as_deref().filter(|u| !u.is_empty()),
            "has_pdf": model.pdf_url.as_deref().is_some_and(|u| !u.is_empty()),
        });
        self.hb.render(LANDING, &data)
    }

    /// Bare not-found state: no metadata and no schema script.
    pub(crate) fn not_found_page(&self) -> Result<String, RenderError> {
        self.hb.render(NOT_FOUND, &json!({ "style": STYLE }))
    }
}

/// `<` would let `</script>` close the element early; JSON accepts the
/// `<` escape in its place.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}
