use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use pantry_core::domain::authentication::value_objects::Identity;

use super::http::server::api_entities::api_error::ApiError;

/// Header set by the upstream gateway once the caller has been authenticated.
pub const USER_ID_HEADER: &str = "x-user-id";

pub fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|uid| !uid.is_empty())
        .map(Identity::new)
}

/// Extractor for an authenticated caller. Rejects with 401 when absent.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(RequiredIdentity(identity));
        }

        let identity = identity_from_headers(&parts.headers).ok_or_else(|| {
            ApiError::Unauthorized(format!(
                "Authentication required: missing {} header",
                USER_ID_HEADER
            ))
        })?;

        parts.extensions.insert(identity.clone());

        Ok(RequiredIdentity(identity))
    }
}
