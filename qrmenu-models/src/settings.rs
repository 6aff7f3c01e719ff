use config::{Config, File};
use qrmenu_error::QMResult;
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};

use crate::constants::{
    DATA_DIR, DEFAULT_ASSET_BUCKET, DEFAULT_BUSINESS_TYPE, DEFAULT_COUNTRY_CODE,
    DEFAULT_ICON_URL, DEFAULT_PRICE_RANGE,
};

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self(Arc::new(Inner::default()))
    }
}

impl From<Inner> for Settings {
    fn from(inner: Inner) -> Self {
        Self(Arc::new(inner))
    }
}

impl Settings {
    pub fn new(config_path: String) -> QMResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("QM")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("web.cors.whitelist.origins")
                    .with_list_parse_key("web.cors.whitelist.methods")
                    .with_list_parse_key("web.cors.whitelist.headers"),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub admin: Admin,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub assets: Assets,
    #[serde(default)]
    pub schema: Schema,
    #[serde(default)]
    pub proxy: Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Runtime root directory for all relative paths (`./data`, `./logs`).
    ///
    /// Applied by changing the process working directory at startup.
    /// Override with `QM__GENERAL__RUNTIME_DIR=/var/lib/qrmenu`.
    #[serde(default = "General::runtime_dir_default")]
    pub runtime_dir: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            runtime_dir: General::runtime_dir_default(),
        }
    }
}

impl General {
    fn runtime_dir_default() -> String {
        ".".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::router_prefix_default")]
    pub router_prefix: String,
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default = "Web::workers_default")]
    pub workers: usize,
    /// Externally reachable origin of the public pages, used as the QR target
    /// (`<public_base_url>/<slug>`).
    #[serde(default = "Web::public_base_url_default")]
    pub public_base_url: String,
    #[serde(default)]
    pub cors: Cors,
    #[serde(default)]
    pub jwt: Jwt,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            router_prefix: Web::router_prefix_default(),
            host: Web::host_default(),
            port: Web::port_default(),
            workers: Web::workers_default(),
            public_base_url: Web::public_base_url_default(),
            cors: Default::default(),
            jwt: Default::default(),
        }
    }
}

impl Web {
    fn router_prefix_default() -> String {
        "/api".into()
    }

    fn port_default() -> u16 {
        3000
    }

    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn workers_default() -> usize {
        // 0 lets actix pick the number of physical cores
        0
    }

    fn public_base_url_default() -> String {
        "http://localhost:3000".into()
    }

    /// Public URL of a client's landing page.
    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), slug)
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
pub struct Cors {
    #[serde(default)]
    pub mode: CorsMode,
    #[serde(default)]
    pub whitelist: Whitelist,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    AllowAll,
    Whitelist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Whitelist {
    #[serde(default = "Whitelist::origins_default")]
    pub origins: Vec<String>,
    #[serde(default = "Whitelist::methods_default")]
    pub methods: Vec<String>,
    #[serde(default = "Whitelist::headers_default")]
    pub headers: Vec<String>,
    #[serde(default = "Whitelist::credentials_default")]
    pub credentials: bool,
}

impl Default for Whitelist {
    fn default() -> Self {
        Whitelist {
            origins: Whitelist::origins_default(),
            methods: Whitelist::methods_default(),
            headers: Whitelist::headers_default(),
            credentials: Whitelist::credentials_default(),
        }
    }
}

impl Whitelist {
    fn origins_default() -> Vec<String> {
        vec!["*".into()]
    }

    fn methods_default() -> Vec<String> {
        vec!["GET".into(), "POST".into(), "PUT".into(), "DELETE".into()]
    }

    fn headers_default() -> Vec<String> {
        vec!["Content-Type".into(), "Authorization".into()]
    }

    fn credentials_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
    #[serde(default = "Jwt::secret_default")]
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "Jwt::expire_default")]
    pub expire: i64,
    #[serde(default = "Jwt::issuer_default")]
    pub issuer: String,
}

impl Default for Jwt {
    fn default() -> Self {
        Jwt {
            secret: Jwt::secret_default(),
            expire: Jwt::expire_default(),
            issuer: Jwt::issuer_default(),
        }
    }
}

impl Jwt {
    fn secret_default() -> String {
        "qrmenu".into()
    }

    fn expire_default() -> i64 {
        86_400
    }

    fn issuer_default() -> String {
        "qrmenu".into()
    }
}

/// The single operator account allowed into the admin console.
#[derive(Debug, Clone, Deserialize)]
pub struct Admin {
    #[serde(default = "Admin::email_default")]
    pub email: String,
    /// bcrypt hash of the operator password. Empty disables login.
    #[serde(default)]
    pub password_hash: String,
}

impl Default for Admin {
    fn default() -> Self {
        Admin {
            email: Admin::email_default(),
            password_hash: String::new(),
        }
    }
}

impl Admin {
    fn email_default() -> String {
        "admin@localhost".into()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl Sqlite {
    fn path_default() -> String {
        "qrmenu.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        5000
    }

    fn max_lifetime_default() -> u64 {
        5000
    }

    fn max_connections_default() -> u32 {
        20
    }

    fn auto_create_default() -> bool {
        true
    }

    pub fn db_path(&self) -> String {
        format!("{}/{}", DATA_DIR, self.path)
    }

    pub fn to_url(&self) -> String {
        if self.auto_create {
            // mode=rwc creates the file when it does not exist
            format!("sqlite:{}?mode=rwc", self.db_path())
        } else {
            format!("sqlite:{}", self.db_path())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub r#type: AssetStoreType,
    #[serde(default = "Assets::bucket_default")]
    pub bucket: String,
    /// Filesystem backend: directory holding the bucket directory.
    #[serde(default = "Assets::root_dir_default")]
    pub root_dir: String,
    /// Filesystem backend: origin prepended to `/<bucket>/<path>` in public URLs.
    #[serde(default = "Assets::public_base_url_default")]
    pub public_base_url: String,
    #[serde(default)]
    pub supabase: Supabase,
}

impl Default for Assets {
    fn default() -> Self {
        Assets {
            r#type: Default::default(),
            bucket: Assets::bucket_default(),
            root_dir: Assets::root_dir_default(),
            public_base_url: Assets::public_base_url_default(),
            supabase: Default::default(),
        }
    }
}

impl Assets {
    fn bucket_default() -> String {
        DEFAULT_ASSET_BUCKET.into()
    }

    fn root_dir_default() -> String {
        format!("{DATA_DIR}/assets")
    }

    fn public_base_url_default() -> String {
        "http://localhost:3000".into()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssetStoreType {
    #[default]
    Filesystem,
    Supabase,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Supabase {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub service_key: String,
    #[serde(default = "Supabase::timeout_ms_default")]
    pub timeout_ms: u64,
}

impl Supabase {
    fn timeout_ms_default() -> u64 {
        30_000
    }
}

/// Business schema (JSON-LD) constants written on every save.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(default = "Schema::business_type_default")]
    pub business_type: String,
    #[serde(default = "Schema::country_code_default")]
    pub country_code: String,
    #[serde(default = "Schema::default_price_range_default")]
    pub default_price_range: String,
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            business_type: Schema::business_type_default(),
            country_code: Schema::country_code_default(),
            default_price_range: Schema::default_price_range_default(),
        }
    }
}

impl Schema {
    fn business_type_default() -> String {
        DEFAULT_BUSINESS_TYPE.into()
    }

    fn country_code_default() -> String {
        DEFAULT_COUNTRY_CODE.into()
    }

    fn default_price_range_default() -> String {
        DEFAULT_PRICE_RANGE.into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Proxy {
    /// Upstream fetch timeout for the PDF passthrough, in milliseconds.
    #[serde(default = "Proxy::timeout_ms_default")]
    pub timeout_ms: u64,
    #[serde(default = "Proxy::cache_max_age_secs_default")]
    pub cache_max_age_secs: u64,
    #[serde(default = "Proxy::fallback_icon_url_default")]
    pub fallback_icon_url: String,
}

impl Default for Proxy {
    fn default() -> Self {
        Proxy {
            timeout_ms: Proxy::timeout_ms_default(),
            cache_max_age_secs: Proxy::cache_max_age_secs_default(),
            fallback_icon_url: Proxy::fallback_icon_url_default(),
        }
    }
}

impl Proxy {
    fn timeout_ms_default() -> u64 {
        15_000
    }

    fn cache_max_age_secs_default() -> u64 {
        3600
    }

    fn fallback_icon_url_default() -> String {
        DEFAULT_ICON_URL.into()
    }
}
