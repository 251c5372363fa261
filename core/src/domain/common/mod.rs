pub mod entities;
pub mod policies;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone, Debug)]
pub struct PantryConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub messaging: MessagingConfig,
    pub reminder: ReminderConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
}

#[derive(Clone, Debug)]
pub struct MessagingConfig {
    /// Overrides the project of the service account when set.
    pub fcm_project_id: String,
    /// Path to a Google service account JSON key.
    pub fcm_credentials_path: String,
}

#[derive(Clone, Debug, Default)]
pub struct ReminderConfig {
    /// Identities allowed to trigger an on-demand sweep for themselves.
    pub debug_uids: Vec<String>,
}
