use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, policies::PantryPolicy},
    reminder::ports::ReminderPolicy,
};

impl ReminderPolicy for PantryPolicy {
    async fn can_trigger_sweep(&self, identity: &Identity) -> Result<bool, CoreError> {
        Ok(self.debug_uids.contains(identity.id()))
    }
}
