use serde::{Deserialize, Serialize};

/// Caller identity as established by the upstream gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    uid: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    pub fn id(&self) -> &str {
        &self.uid
    }
}
