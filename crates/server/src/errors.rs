use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Handler error, rendered as a status code plus (except for 404) a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Model(_) => Self::Validation(e.to_string()),
            ServiceError::Storage(_) => Self::Internal(e.to_string()),
        }
    }
}

/// Unreadable or mistyped request bodies are validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "Validation Error", msg),
            Self::Internal(msg) => {
                error!(error = %msg, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
        }
    }
}

fn json_error(status: StatusCode, title: &str, msg: String) -> Response {
    (status, Json(serde_json::json!({"error": title, "message": msg}))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::not_found("person"), StatusCode::NOT_FOUND),
            (ServiceError::Model(ModelError::required("lastName")), StatusCode::BAD_REQUEST),
            (ServiceError::Storage("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let res = ApiError::NotFound.into_response();
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert!(body.is_empty());
    }
}
