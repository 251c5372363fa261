use crate::domain::{
    common::policies::PantryPolicy, device_token::ports::DeviceTokenRepository,
    pantry::ports::{PantryItemRepository, PantryUserRepository},
    pantry_scan::ports::LLMClient, reminder::ports::Notifier,
};

/// Application service. Each domain implements its service trait on it.
#[derive(Clone)]
pub struct Service<U, I, T, N, LLM>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
    LLM: LLMClient,
{
    pub(crate) user_repository: U,
    pub(crate) item_repository: I,
    pub(crate) device_token_repository: T,
    pub(crate) notifier: N,
    pub(crate) llm_client: LLM,
    pub(crate) policy: PantryPolicy,
}

impl<U, I, T, N, LLM> Service<U, I, T, N, LLM>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
    LLM: LLMClient,
{
    pub fn new(
        user_repository: U,
        item_repository: I,
        device_token_repository: T,
        notifier: N,
        llm_client: LLM,
        policy: PantryPolicy,
    ) -> Self {
        Self {
            user_repository,
            item_repository,
            device_token_repository,
            notifier,
            llm_client,
            policy,
        }
    }
}
