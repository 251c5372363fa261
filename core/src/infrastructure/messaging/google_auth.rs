use std::{fmt, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::domain::common::entities::app_errors::CoreError;

pub const FIREBASE_MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// A cached token is renewed once it gets this close to expiry.
const EXPIRY_MARGIN_SECS: i64 = 300;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service account JSON key that the token exchange
/// needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl<'a> AssertionClaims<'a> {
    fn new(key: &'a ServiceAccountKey, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();

        Self {
            iss: &key.client_email,
            scope: FIREBASE_MESSAGING_SCOPE,
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// OAuth2 access tokens for the FCM scope, minted from a service account
/// key with the JWT bearer grant and cached until shortly before expiry.
#[derive(Clone)]
pub struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
    client: Client,
    cached: Arc<Mutex<Option<CachedToken>>>,
}

impl fmt::Debug for ServiceAccountTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountTokenProvider")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountTokenProvider {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            client: Client::new(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Parses a service account key and checks that its private key is a
    /// usable RSA PEM.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let key: ServiceAccountKey = serde_json::from_str(json).map_err(|e| {
            CoreError::ConfigurationError(format!("Invalid service account key: {}", e))
        })?;

        EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            CoreError::ConfigurationError(format!("Invalid service account private key: {}", e))
        })?;

        Ok(Self::new(key))
    }

    pub fn from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigurationError(format!(
                "Cannot read service account key {}: {}",
                path, e
            ))
        })?;

        Self::from_json(&json)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.key
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub async fn access_token(&self) -> Result<String, CoreError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.access_token.clone());
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);

        Ok(access_token)
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<CachedToken, CoreError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(self.key.private_key.as_bytes()).map_err(|e| {
                error!("Invalid service account private key: {}", e);
                CoreError::ConfigurationError("Invalid service account private key".to_string())
            })?;

        let assertion = encode(
            &Header::new(Algorithm::RS256),
            &AssertionClaims::new(&self.key, now),
            &encoding_key,
        )
        .map_err(|e| {
            error!("Failed to sign token assertion: {}", e);
            CoreError::InternalServerError
        })?;

        let body = format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT),
            urlencoding::encode(&assertion)
        );

        let response = self
            .client
            .post(&self.key.token_uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("OAuth token request failed: {}", e);
                CoreError::ExternalServiceError(format!("OAuth token error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("OAuth token endpoint error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "OAuth token endpoint returned error: {} - {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse OAuth token response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse OAuth token: {}", e))
        })?;

        debug!(expires_in = token.expires_in, "FCM access token refreshed");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + TimeDelta::seconds(token.expires_in.clamp(0, 86_400)),
        })
    }
}
