use crate::{
    domain::common::{PantryConfig, policies::PantryPolicy, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        device_token::PostgresDeviceTokenRepository,
        llm::gemini_client::GeminiLLMClient,
        messaging::fcm_notifier::FcmNotifier,
        pantry::{PostgresPantryItemRepository, PostgresPantryUserRepository},
    },
};

pub type PantryService = Service<
    PostgresPantryUserRepository,
    PostgresPantryItemRepository,
    PostgresDeviceTokenRepository,
    FcmNotifier,
    GeminiLLMClient,
>;

pub async fn create_service(config: PantryConfig) -> Result<PantryService, anyhow::Error> {
    let llm_client = GeminiLLMClient::from_config(&config.llm)?;
    let notifier = FcmNotifier::from_config(&config.messaging)?;

    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    Ok(Service::new(
        PostgresPantryUserRepository::new(postgres.get_db()),
        PostgresPantryItemRepository::new(postgres.get_db()),
        PostgresDeviceTokenRepository::new(postgres.get_db()),
        notifier,
        llm_client,
        PantryPolicy::new(config.reminder.debug_uids),
    ))
}
