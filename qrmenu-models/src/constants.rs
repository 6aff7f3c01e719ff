// Constants shared across the qrmenu crates

/// The default configuration file name, looked up in the working directory
/// when no `--config` flag or `QM_CONFIG` variable is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "qrmenu.toml";

pub const BEARER_TOKEN: &str = "Bearer";

pub const DATA_DIR: &str = "./data";
pub const LOG_DIR: &str = "logs";

/// Bucket namespace shared by every client asset.
pub const DEFAULT_ASSET_BUCKET: &str = "client-assets";

/// `priceRange` written into the business schema when the form leaves it blank.
pub const DEFAULT_PRICE_RANGE: &str = "₹300 - ₹2500";
pub const DEFAULT_BUSINESS_TYPE: &str = "Bakery";
pub const DEFAULT_COUNTRY_CODE: &str = "IN";
pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const POSTAL_ADDRESS_TYPE: &str = "PostalAddress";

/// Icon used by the public page when a client has no favicon.
pub const DEFAULT_ICON_URL: &str = "/logo.png";
