//! Test harness: a real SQLite repository in memory plus a filesystem asset
//! store in a temp dir.

use crate::{configure_app, AppState};
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    App,
};
use chrono::Utc;
use qrmenu_models::{
    domain::prelude::{Claims, ClientPayload},
    settings::{Admin, Assets, Inner, Settings, Web},
};
use qrmenu_repository::ClientRepository;
use qrmenu_storage::FsAssetStore;
use qrmenu_utils::{hash::bcrypt_hash, jwt::encode_jwt};
use serde_json::json;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

pub struct TestApp {
    pub settings: Settings,
    pub clients: Arc<ClientRepository>,
    pub assets: Arc<FsAssetStore>,
    state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings: Settings = Inner {
            web: Web {
                public_base_url: "http://menus.test".into(),
                ..Default::default()
            },
            admin: Admin {
                email: "admin@localhost".into(),
                password_hash: bcrypt_hash("secret").unwrap(),
            },
            assets: Assets {
                root_dir: dir.path().to_string_lossy().to_string(),
                public_base_url: "http://assets.test".into(),
                ..Default::default()
            },
            ..Default::default()
        }
        .into();

        let db = qrmenu_storage::init_memory_db().await.unwrap();
        let clients = Arc::new(ClientRepository::new(db));
        let assets = Arc::new(
            FsAssetStore::new(
                &settings.assets.root_dir,
                &settings.assets.bucket,
                &settings.assets.public_base_url,
            )
            .await
            .unwrap(),
        );
        let state = AppState::new(settings.clone(), clients.clone(), assets.clone()).unwrap();

        TestApp {
            settings,
            clients,
            assets,
            state,
            _dir: dir,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = self.state.clone();
        App::new().configure(move |cfg| configure_app(cfg, &state))
    }

    /// On-disk location of a bucket-relative asset path.
    pub fn asset_file(&self, path: &str) -> PathBuf {
        self.assets.root().join(path)
    }
}

pub fn admin_token(settings: &Settings) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: settings.admin.email.clone(),
        iss: settings.web.jwt.issuer.clone(),
        iat: now,
        exp: now + 600,
    };
    encode_jwt(&claims, settings.web.jwt.secret.as_bytes(), None).unwrap()
}

/// Stored row with a pdf and no other asset.
pub fn sample_payload(slug: &str) -> ClientPayload {
    ClientPayload {
        slug: slug.into(),
        name: "Sweet Tooth".into(),
        description: Some("Cakes and more".into()),
        pdf_url: Some("http://assets.test/client-assets/pdfs/1-menu.pdf".into()),
        json_ld: Some(json!({"@type": "Bakery", "name": "Sweet Tooth"})),
        ..Default::default()
    }
}

pub struct Part {
    name: String,
    file: Option<(String, String)>,
    data: Vec<u8>,
}

impl Part {
    pub fn text(name: &str, value: &str) -> Self {
        Part {
            name: name.into(),
            file: None,
            data: value.as_bytes().to_vec(),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        Part {
            name: name.into(),
            file: Some((file_name.into(), content_type.into())),
            data: data.to_vec(),
        }
    }
}

/// Encodes `parts` as `multipart/form-data`; returns the content type and body.
pub fn multipart_body(parts: &[Part]) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "----qrmenu-test-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match &part.file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        part.name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
