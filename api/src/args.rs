use clap::Parser;
use pantry_core::domain::common::{
    DEFAULT_GEMINI_MODEL, DatabaseConfig, LLMConfig, MessagingConfig, PantryConfig,
    ReminderConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "pantry-api", version, about = "Pantry reminder and scan API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub messaging: MessagingArgs,

    #[command(flatten)]
    pub reminder: ReminderArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(id = "server-host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server-port", long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(id = "database-host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database-port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres"
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "pantry")]
    pub name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "")]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct MessagingArgs {
    /// Defaults to the project of the service account key.
    #[arg(long = "fcm-project-id", env = "FCM_PROJECT_ID", default_value = "")]
    pub fcm_project_id: String,

    /// Service account JSON key used to mint FCM access tokens.
    #[arg(
        long = "fcm-credentials-path",
        env = "FCM_CREDENTIALS_PATH",
        default_value = ""
    )]
    pub fcm_credentials_path: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ReminderArgs {
    /// UTC hour of the daily sweep.
    #[arg(
        long = "reminder-sweep-hour",
        env = "REMINDER_SWEEP_HOUR",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub sweep_hour: u32,

    #[arg(
        long = "reminder-schedule-enabled",
        env = "REMINDER_SCHEDULE_ENABLED",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub schedule_enabled: bool,

    /// Identities allowed to call the on-demand sweep endpoint.
    #[arg(
        long = "reminder-debug-uids",
        env = "REMINDER_DEBUG_UIDS",
        value_delimiter = ','
    )]
    pub debug_uids: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for PantryConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
            },
            messaging: MessagingConfig {
                fcm_project_id: args.messaging.fcm_project_id,
                fcm_credentials_path: args.messaging.fcm_credentials_path,
            },
            reminder: ReminderConfig {
                debug_uids: args.reminder.debug_uids,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_config() {
        let args = Args::try_parse_from([
            "pantry-api",
            "--database-host",
            "db",
            "--gemini-api-key",
            "key",
            "--gemini-model",
            "gemini-test",
            "--fcm-project-id",
            "pantry-app",
            "--fcm-credentials-path",
            "/etc/pantry/firebase.json",
            "--reminder-sweep-hour",
            "6",
            "--reminder-debug-uids",
            "alice,bob",
        ])
        .unwrap();

        assert_eq!(args.reminder.sweep_hour, 6);
        assert!(args.reminder.schedule_enabled);

        let config = PantryConfig::from(args);

        assert_eq!(config.database.host, "db");
        assert_eq!(config.llm.gemini_model, "gemini-test");
        assert_eq!(config.messaging.fcm_project_id, "pantry-app");
        assert_eq!(
            config.messaging.fcm_credentials_path,
            "/etc/pantry/firebase.json"
        );
        assert_eq!(config.reminder.debug_uids, vec!["alice", "bob"]);
    }

    #[test]
    fn test_sweep_hour_is_bounded() {
        let result = Args::try_parse_from(["pantry-api", "--reminder-sweep-hour", "24"]);
        assert!(result.is_err());
    }
}
