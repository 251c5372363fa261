use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    reminder::entities::{DispatchReport, NotificationPayload, SweepResult},
};

/// Push delivery. Individual token failures are reported as counts in the
/// [`DispatchReport`], never as errors.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn send_batch(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> impl Future<Output = Result<DispatchReport, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReminderService: Send + Sync {
    /// Sweeps every user. Triggered by the daily schedule.
    fn run_scheduled_sweep(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<SweepResult, CoreError>> + Send;

    /// Sweeps only the caller. The caller must be allow-listed.
    fn run_debug_sweep(
        &self,
        identity: Identity,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<SweepResult, CoreError>> + Send;
}

pub trait ReminderPolicy: Send + Sync {
    fn can_trigger_sweep(
        &self,
        identity: &Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
