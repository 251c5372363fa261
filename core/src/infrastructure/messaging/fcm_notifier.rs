use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::google_auth::ServiceAccountTokenProvider;
use crate::domain::{
    common::{MessagingConfig, entities::app_errors::CoreError},
    reminder::{
        entities::{DispatchReport, NotificationPayload, TokenOutcome},
        ports::Notifier,
    },
};

const FCM_API_BASE: &str = "https://fcm.googleapis.com/v1/projects";

/// Firebase Cloud Messaging HTTP v1 sender.
#[derive(Debug, Clone)]
pub struct FcmNotifier {
    project_id: String,
    token_provider: ServiceAccountTokenProvider,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
    android: AndroidConfig,
    apns: ApnsConfig,
}

#[derive(Debug, Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct AndroidConfig {
    priority: &'static str,
}

#[derive(Debug, Serialize)]
struct ApnsConfig {
    headers: ApnsHeaders,
}

#[derive(Debug, Serialize)]
struct ApnsHeaders {
    #[serde(rename = "apns-priority")]
    apns_priority: &'static str,
}

impl<'a> SendRequest<'a> {
    fn new(token: &'a str, payload: &'a NotificationPayload) -> Self {
        Self {
            message: Message {
                token,
                notification: Notification {
                    title: &payload.title,
                    body: &payload.body,
                },
                android: AndroidConfig {
                    priority: payload.priority.android(),
                },
                apns: ApnsConfig {
                    headers: ApnsHeaders {
                        apns_priority: payload.priority.apns(),
                    },
                },
            },
        }
    }
}

impl FcmNotifier {
    pub fn new(project_id: String, token_provider: ServiceAccountTokenProvider) -> Self {
        Self {
            project_id,
            token_provider,
            client: Client::new(),
        }
    }

    /// Loads the service account key. The project defaults to the key's own.
    pub fn from_config(config: &MessagingConfig) -> Result<Self, CoreError> {
        if config.fcm_credentials_path.trim().is_empty() {
            return Err(CoreError::ConfigurationError(
                "Missing FCM_CREDENTIALS_PATH".to_string(),
            ));
        }

        let token_provider = ServiceAccountTokenProvider::from_file(&config.fcm_credentials_path)?;
        let project_id = resolve_project_id(&config.fcm_project_id, &token_provider)?;

        Ok(Self::new(project_id, token_provider))
    }

    async fn send_one(
        &self,
        access_token: &str,
        token: &str,
        payload: &NotificationPayload,
    ) -> TokenOutcome {
        let url = format!("{}/{}/messages:send", FCM_API_BASE, self.project_id);

        let result = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&SendRequest::new(token, payload))
            .send()
            .await;

        let error = match result {
            Ok(response) if response.status().is_success() => None,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Some(format!("{} - {}", status, body))
            }
            Err(e) => Some(e.to_string()),
        };

        if let Some(error) = &error {
            warn!("FCM send failed: {}", error);
        } else {
            debug!("FCM message delivered");
        }

        TokenOutcome {
            token: token.to_string(),
            delivered: error.is_none(),
            error,
        }
    }
}

fn resolve_project_id(
    configured: &str,
    token_provider: &ServiceAccountTokenProvider,
) -> Result<String, CoreError> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }

    token_provider
        .project_id()
        .map(str::to_string)
        .ok_or_else(|| CoreError::ConfigurationError("Missing FCM_PROJECT_ID".to_string()))
}

impl Notifier for FcmNotifier {
    async fn send_batch(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<DispatchReport, CoreError> {
        if tokens.is_empty() {
            return Ok(DispatchReport::default());
        }

        // One access token per batch; a failed refresh fails the whole batch.
        let access_token = self.token_provider.access_token().await?;

        let outcomes = join_all(
            tokens
                .iter()
                .map(|token| self.send_one(&access_token, token, payload)),
        )
        .await;

        Ok(DispatchReport::from_outcomes(outcomes))
    }
}
