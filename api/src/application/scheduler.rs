use chrono::{DateTime, Days, NaiveTime, Utc};
use pantry_core::domain::reminder::ports::ReminderService;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Next instant strictly after `now` at `hour`:00 UTC.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(at).and_utc();

    if today > now {
        return today;
    }

    now.date_naive()
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.and_time(at).and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Runs a full reminder sweep every day at `hour` UTC.
pub fn spawn_daily_sweep<S>(service: S, hour: u32) -> JoinHandle<()>
where
    S: ReminderService + 'static,
{
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_run_after(now, hour);
            let wait = (next - now).to_std().unwrap_or_default();

            info!(next_run = %next, "Next reminder sweep scheduled");
            tokio::time::sleep(wait).await;

            run_sweep_once(&service, Utc::now()).await;
        }
    })
}

/// Counters are logged by the sweep itself; only a failure is reported here.
async fn run_sweep_once<S: ReminderService>(service: &S, now: DateTime<Utc>) {
    if let Err(e) = service.run_scheduled_sweep(now).await {
        error!(error = %e, "Scheduled reminder sweep failed");
    }
}
