use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pantry_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "E_FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::ValidationError(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E_VALIDATION_ERROR")
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_BAD_GATEWAY"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Invalid => ApiError::BadRequest(error.to_string()),
            CoreError::NotFound => ApiError::NotFound(error.to_string()),
            CoreError::Forbidden(message) => ApiError::Forbidden(message),
            CoreError::ExternalServiceError(message) => ApiError::BadGateway(message),
            CoreError::ConfigurationError(_) | CoreError::InternalServerError => {
                tracing::error!("Internal error: {}", error);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let body = ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    fn json_request(body: serde_json::Value) -> Request {
        http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_core_error_status_mapping() {
        let cases = [
            (CoreError::Invalid, StatusCode::BAD_REQUEST),
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (CoreError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
            (
                CoreError::ExternalServiceError("down".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CoreError::ConfigurationError("key".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (CoreError::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = ApiError::from(CoreError::ConfigurationError("GEMINI_API_KEY".to_string()));
        assert_eq!(
            error,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[tokio::test]
    async fn test_validate_json_runs_rules() {
        let ok = ValidateJson::<Named>::from_request(json_request(json!({ "name": "a" })), &())
            .await
            .unwrap();
        assert_eq!(ok.0.name, "a");

        let invalid =
            ValidateJson::<Named>::from_request(json_request(json!({ "name": "" })), &()).await;
        assert!(matches!(invalid, Err(ApiError::ValidationError(_))));

        let malformed =
            ValidateJson::<Named>::from_request(json_request(json!({ "other": 1 })), &()).await;
        assert!(matches!(malformed, Err(ApiError::BadRequest(_))));
    }
}
