//! Supabase Storage REST backend.
//!
//! - upload: `POST   {url}/storage/v1/object/{bucket}/{path}`
//! - remove: `DELETE {url}/storage/v1/object/{bucket}` with `{"prefixes": [...]}`
//! - public: `{url}/storage/v1/object/public/{bucket}/{path}`

use super::validate_path;
use async_trait::async_trait;
use bytes::Bytes;
use qrmenu_error::{asset::AssetError, AssetResult};
use qrmenu_models::{settings::Supabase, AssetStore};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct SupabaseAssetStore {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseAssetStore {
    pub fn new(config: &Supabase, bucket: &str) -> AssetResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            bucket: bucket.to_string(),
        })
    }

    #[inline]
    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    #[inline]
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

/// Turn a non-2xx answer into `AssetError::Rejected` carrying the response body.
async fn check(response: Response) -> AssetResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AssetError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AssetStore for SupabaseAssetStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(name = "supabase-asset-upload", skip(self, bytes))]
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str) -> AssetResult<String> {
        validate_path(path)?;
        let request = self
            .authorized(self.client.post(self.object_url(path)))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        check(request.send().await?).await?;
        debug!("Uploaded asset");
        Ok(self.public_url(path))
    }

    #[instrument(name = "supabase-asset-remove", skip(self))]
    async fn remove(&self, paths: &[String]) -> AssetResult<()> {
        for path in paths {
            validate_path(path)?;
        }
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);
        let request = self
            .authorized(self.client.delete(url))
            .json(&json!({ "prefixes": paths }));
        check(request.send().await?).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}
