//! Business schema (JSON-LD) assembly.

use qrmenu_models::{
    constants::{POSTAL_ADDRESS_TYPE, SCHEMA_CONTEXT},
    domain::prelude::{BusinessSchema, ClientForm, PostalAddress},
    settings::Schema,
};

/// Builds the complete schema object for a save.
///
/// `image` is the final og image URL, else the final logo URL. The result
/// always replaces whatever was stored before.
pub fn build_business_schema(
    form: &ClientForm,
    og_image_url: Option<&str>,
    logo_url: Option<&str>,
    schema: &Schema,
) -> BusinessSchema {
    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();

    let price_range = form
        .price_range
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(schema.default_price_range.as_str())
        .to_string();

    BusinessSchema {
        context: SCHEMA_CONTEXT.to_string(),
        kind: schema.business_type.clone(),
        name: form.name.trim().to_string(),
        image: og_image_url
            .filter(|u| !u.is_empty())
            .or(logo_url.filter(|u| !u.is_empty()))
            .unwrap_or_default()
            .to_string(),
        description: form.description.trim().to_string(),
        telephone: text(&form.phone),
        price_range,
        address: PostalAddress {
            kind: POSTAL_ADDRESS_TYPE.to_string(),
            street_address: text(&form.address),
            address_country: schema.country_code.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> ClientForm {
        ClientForm {
            name: "Sweet Tooth".into(),
            slug: "Sweet Tooth".into(),
            description: "Cakes and more".into(),
            phone: Some("+91 99999 00000".into()),
            address: Some("Shop 4, Ring Road".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_defaults_and_shape() {
        let schema = build_business_schema(
            &form(),
            None,
            Some("https://x/client-assets/logos/1-l.png"),
            &Schema::default(),
        );
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "@context": "https://schema.org",
                "@type": "Bakery",
                "name": "Sweet Tooth",
                "image": "https://x/client-assets/logos/1-l.png",
                "description": "Cakes and more",
                "telephone": "+91 99999 00000",
                "priceRange": "₹300 - ₹2500",
                "address": {
                    "@type": "PostalAddress",
                    "streetAddress": "Shop 4, Ring Road",
                    "addressCountry": "IN"
                }
            })
        );
    }

    #[test]
    fn test_schema_prefers_og_image_and_given_price_range() {
        let mut form = form();
        form.price_range = Some("₹100 - ₹900".into());
        let config = Schema {
            business_type: "Restaurant".into(),
            country_code: "AE".into(),
            ..Default::default()
        };
        let schema = build_business_schema(&form, Some("https://x/og.png"), Some("https://x/l.png"), &config);
        assert_eq!(schema.image, "https://x/og.png");
        assert_eq!(schema.price_range, "₹100 - ₹900");
        assert_eq!(schema.kind, "Restaurant");
        assert_eq!(schema.address.address_country, "AE");
    }

    #[test]
    fn test_schema_blank_optionals() {
        let mut form = form();
        form.phone = None;
        form.address = None;
        form.price_range = Some("   ".into());
        let schema = build_business_schema(&form, Some(""), None, &Schema::default());
        assert_eq!(schema.image, "");
        assert_eq!(schema.telephone, "");
        assert_eq!(schema.address.street_address, "");
        assert_eq!(schema.price_range, "₹300 - ₹2500");
    }
}
