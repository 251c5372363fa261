use std::collections::HashSet;

use crate::domain::common::entities::app_errors::CoreError;

/// Turns a policy check into an error when it denies access.
pub fn ensure_policy(result: Result<bool, CoreError>, message: &str) -> Result<(), CoreError> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(CoreError::Forbidden(message.to_string())),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PantryPolicy {
    pub(crate) debug_uids: HashSet<String>,
}

impl PantryPolicy {
    pub fn new<I>(debug_uids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            debug_uids: debug_uids
                .into_iter()
                .map(|uid| uid.trim().to_string())
                .filter(|uid| !uid.is_empty())
                .collect(),
        }
    }
}
