use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Items of one user that qualify for a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReminderDecision {
    /// Names of dated items expiring within the threshold, in input order.
    pub dated_expiring_soon: Vec<String>,
    /// Names of undated perishables held past the stale cutoff, in input order.
    pub perishable_stale: Vec<String>,
}

impl ReminderDecision {
    pub fn is_empty(&self) -> bool {
        self.dated_expiring_soon.is_empty() && self.perishable_stale.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    High,
}

impl NotificationPriority {
    pub fn android(&self) -> &'static str {
        match self {
            NotificationPriority::High => "HIGH",
        }
    }

    pub fn apns(&self) -> &'static str {
        match self {
            NotificationPriority::High => "10",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub priority: NotificationPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenOutcome {
    pub token: String,
    pub delivered: bool,
    pub error: Option<String>,
}

/// Result of one batch dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub outcomes: Vec<TokenOutcome>,
}

impl DispatchReport {
    pub fn from_outcomes(outcomes: Vec<TokenOutcome>) -> Self {
        let success_count = outcomes.iter().filter(|o| o.delivered).count();

        Self {
            success_count,
            failure_count: outcomes.len() - success_count,
            outcomes,
        }
    }
}

/// Aggregate counters of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SweepResult {
    pub users_evaluated: usize,
    pub notifications_attempted: usize,
    pub success_count: usize,
    pub failure_count: usize,
}
