use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::{client::ClientError, storage::StorageError, QMError};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("DBError: `{0}`")]
    StorageError(#[from] StorageError),
    #[error("UploadError: `{0}`")]
    UploadError(String),
    #[error("MultipartError: `{0}`")]
    MultipartError(String),
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<QMError> for WebError {
    fn from(e: QMError) -> Self {
        match e {
            QMError::StorageError(StorageError::EntityNotFound(msg)) => WebError::NotFound(msg),
            QMError::ClientError(e) => e.into(),
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl From<ClientError> for WebError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Validation(msg) => WebError::BadRequest(msg),
            ClientError::NotFound(what) => WebError::NotFound(what),
            ClientError::Storage(StorageError::EntityNotFound(what)) => WebError::NotFound(what),
            ClientError::Storage(e) => WebError::StorageError(e),
            upload @ ClientError::Upload { .. } => WebError::UploadError(upload.to_string()),
            schema @ ClientError::Schema(_) => WebError::InternalError(schema.to_string()),
        }
    }
}

impl From<actix_multipart::MultipartError> for WebError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        WebError::MultipartError(e.to_string())
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "message": self.to_string()
        });
        match self {
            WebError::Unauthorized => {
                body["error"] = json!("Unauthorized");
                HttpResponse::Unauthorized().json(body)
            }
            WebError::BadRequest(_) => {
                body["error"] = json!("Bad Request");
                HttpResponse::BadRequest().json(body)
            }
            WebError::NotFound(_) => {
                body["error"] = json!("Not Found");
                HttpResponse::NotFound().json(body)
            }
            WebError::InternalError(_) => {
                body["error"] = json!("Internal Server Error");
                HttpResponse::InternalServerError().json(body)
            }
            WebError::StorageError(_) => {
                body["error"] = json!("Storage Error");
                HttpResponse::InternalServerError().json(body)
            }
            WebError::UploadError(_) => {
                body["error"] = json!("Upload Error");
                HttpResponse::BadGateway().json(body)
            }
            WebError::MultipartError(msg) => {
                body["error"] = json!("Multipart Error");
                body["message"] = json!(msg);
                HttpResponse::BadRequest().json(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_client_error_status_mapping() {
        let validation: WebError = ClientError::Validation("name is required".into()).into();
        assert_eq!(validation.error_response().status(), StatusCode::BAD_REQUEST);

        let upload: WebError = ClientError::Upload {
            path: "pdfs/1-menu.pdf".into(),
            source: AssetError::Rejected {
                status: 413,
                message: "too large".into(),
            },
        }
        .into();
        assert_eq!(upload.error_response().status(), StatusCode::BAD_GATEWAY);
        assert!(upload.to_string().contains("pdfs/1-menu.pdf"));

        let missing: WebError = ClientError::NotFound("client 7".into()).into();
        assert_eq!(missing.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_is_surfaced_verbatim() {
        let err: WebError = ClientError::Storage(StorageError::DBError(sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: client.slug".into(),
        )))
        .into();
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(err
            .to_string()
            .contains("UNIQUE constraint failed: client.slug"));
    }
}
