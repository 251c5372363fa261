use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::{error, info, instrument, warn};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    device_token::ports::DeviceTokenRepository,
    pantry::{
        entities::{PantryItem, PantryUser, UserConfig},
        ports::{PantryItemRepository, PantryUserRepository},
    },
    pantry_scan::ports::LLMClient,
    reminder::{
        entities::{NotificationPayload, NotificationPriority, ReminderDecision, SweepResult},
        ports::{Notifier, ReminderPolicy, ReminderService},
    },
};

pub const NOTIFICATION_TITLE: &str = "Pantry reminder";
const MAX_LISTED_NAMES: usize = 3;
const CLAUSE_SEPARATOR: &str = " | ";

/// Computes which items of one user qualify for a reminder at `now`.
///
/// All comparisons happen on UTC calendar days and both bounds are
/// inclusive. Items without an expiry date are never checked against the
/// expiry window and items not flagged as perishable are never stale.
pub fn evaluate_user(
    config: &UserConfig,
    items: &[PantryItem],
    now: DateTime<Utc>,
) -> ReminderDecision {
    let today_start = now.date_naive();
    let expiry_threshold = today_start
        .checked_add_days(Days::new(u64::from(config.notification_threshold_days)))
        .unwrap_or(NaiveDate::MAX);
    let stale_cutoff = today_start
        .checked_sub_days(Days::new(u64::from(config.perishable_reminder_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut decision = ReminderDecision::default();

    for item in items {
        if let Some(expiry_date) = item.expiry_date
            && today_start <= expiry_date
            && expiry_date <= expiry_threshold
        {
            decision.dated_expiring_soon.push(item.name.clone());
        }

        if item.is_perishable_no_expiry
            && let Some(added_at) = item.added_at
            && added_at.date_naive() <= stale_cutoff
        {
            decision.perishable_stale.push(item.name.clone());
        }
    }

    decision
}

/// Builds the push payload for a decision, or `None` when there is nothing
/// to send.
pub fn build_notification(decision: &ReminderDecision) -> Option<NotificationPayload> {
    if decision.is_empty() {
        return None;
    }

    let mut clauses = Vec::with_capacity(2);

    if !decision.dated_expiring_soon.is_empty() {
        clauses.push(format!(
            "{} item(s) nearing expiry: {}",
            decision.dated_expiring_soon.len(),
            listed_names(&decision.dated_expiring_soon)
        ));
    }

    if !decision.perishable_stale.is_empty() {
        clauses.push(format!(
            "{} perishable item(s) in pantry for a while: {}",
            decision.perishable_stale.len(),
            listed_names(&decision.perishable_stale)
        ));
    }

    Some(NotificationPayload {
        title: NOTIFICATION_TITLE.to_string(),
        body: clauses.join(CLAUSE_SEPARATOR),
        priority: NotificationPriority::High,
    })
}

fn listed_names(names: &[String]) -> String {
    names[..names.len().min(MAX_LISTED_NAMES)].join(", ")
}

/// Evaluates every user (or only `only_uid`) and dispatches reminders.
///
/// A failed read for one user skips that user; a failed dispatch counts all
/// of the user's tokens as failures. Neither stops the sweep.
pub async fn sweep<U, I, T, N>(
    users: &U,
    inventory: &I,
    tokens: &T,
    notifier: &N,
    now: DateTime<Utc>,
    only_uid: Option<&str>,
) -> Result<SweepResult, CoreError>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
{
    let users: Vec<PantryUser> = match only_uid {
        Some(uid) => users.get_user(uid).await?.into_iter().collect(),
        None => users.list_users().await?,
    };

    let mut result = SweepResult::default();

    for user in users {
        let items = match inventory.fetch_non_archived_items(&user.uid).await {
            Ok(items) => items,
            Err(e) => {
                warn!(uid = %user.uid, error = %e, "Skipping user: inventory fetch failed");
                continue;
            }
        };

        result.users_evaluated += 1;

        let decision = evaluate_user(&user.config, &items, now);
        let Some(payload) = build_notification(&decision) else {
            continue;
        };

        let device_tokens = match tokens.fetch_device_tokens(&user.uid).await {
            Ok(device_tokens) => device_tokens,
            Err(e) => {
                warn!(uid = %user.uid, error = %e, "Skipping user: token fetch failed");
                continue;
            }
        };

        if device_tokens.is_empty() {
            continue;
        }

        result.notifications_attempted += 1;

        match notifier.send_batch(&device_tokens, &payload).await {
            Ok(report) => {
                info!(
                    uid = %user.uid,
                    success_count = report.success_count,
                    failure_count = report.failure_count,
                    "Pantry reminder sent"
                );
                result.success_count += report.success_count;
                result.failure_count += report.failure_count;
            }
            Err(e) => {
                error!(uid = %user.uid, error = %e, "Pantry reminder dispatch failed");
                result.failure_count += device_tokens.len();
            }
        }
    }

    Ok(result)
}

fn log_sweep_result(result: &SweepResult, only_uid: Option<&str>) {
    info!(
        only_uid = only_uid.unwrap_or("*"),
        users_evaluated = result.users_evaluated,
        notifications_attempted = result.notifications_attempted,
        success_count = result.success_count,
        failure_count = result.failure_count,
        "Reminder sweep finished"
    );
}

impl<U, I, T, N, LLM> ReminderService for Service<U, I, T, N, LLM>
where
    U: PantryUserRepository,
    I: PantryItemRepository,
    T: DeviceTokenRepository,
    N: Notifier,
    LLM: LLMClient,
{
    #[instrument(skip(self))]
    async fn run_scheduled_sweep(&self, now: DateTime<Utc>) -> Result<SweepResult, CoreError> {
        let result = sweep(
            &self.user_repository,
            &self.item_repository,
            &self.device_token_repository,
            &self.notifier,
            now,
            None,
        )
        .await?;

        log_sweep_result(&result, None);
        Ok(result)
    }

    #[instrument(skip(self), fields(uid = %identity.id()))]
    async fn run_debug_sweep(
        &self,
        identity: Identity,
        now: DateTime<Utc>,
    ) -> Result<SweepResult, CoreError> {
        ensure_policy(
            self.policy.can_trigger_sweep(&identity).await,
            "caller is not allowed to trigger a reminder sweep",
        )?;

        let result = sweep(
            &self.user_repository,
            &self.item_repository,
            &self.device_token_repository,
            &self.notifier,
            now,
            Some(identity.id()),
        )
        .await?;

        log_sweep_result(&result, Some(identity.id()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        common::policies::PantryPolicy,
        device_token::ports::MockDeviceTokenRepository,
        pantry::ports::{MockPantryItemRepository, MockPantryUserRepository},
        pantry_scan::ports::MockLLMClient,
        reminder::{
            entities::{DispatchReport, TokenOutcome},
            ports::MockNotifier,
        },
    };

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn midnight(s: &str) -> DateTime<Utc> {
        date(s).and_hms_opt(0, 0, 0).unwrap().and_utc()
    }

    fn dated(name: &str, expiry: &str) -> PantryItem {
        PantryItem {
            id: Uuid::new_v4(),
            uid: "user-1".to_string(),
            name: name.to_string(),
            is_archived: false,
            expiry_date: Some(date(expiry)),
            added_at: None,
            is_perishable_no_expiry: false,
        }
    }

    fn perishable(name: &str, added_at: DateTime<Utc>) -> PantryItem {
        PantryItem {
            expiry_date: None,
            added_at: Some(added_at),
            is_perishable_no_expiry: true,
            ..dated(name, "2000-01-01")
        }
    }

    fn config(threshold: u32, perishable: u32) -> UserConfig {
        UserConfig {
            notification_threshold_days: threshold,
            perishable_reminder_days: perishable,
        }
    }

    #[test]
    fn test_expiry_window_is_inclusive_on_both_ends() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 15, 30, 0).unwrap();
        let items = vec![
            dated("today", "2024-06-10"),
            dated("edge", "2024-06-13"),
            dated("beyond", "2024-06-14"),
            dated("past", "2024-06-09"),
        ];

        let decision = evaluate_user(&config(3, 7), &items, now);

        assert_eq!(decision.dated_expiring_soon, vec!["today", "edge"]);
        assert!(decision.perishable_stale.is_empty());
    }

    #[test]
    fn test_expiry_scenario_from_threshold_three() {
        let now = midnight("2024-06-10");
        let items = vec![dated("A", "2024-06-12"), dated("B", "2024-06-14")];

        let decision = evaluate_user(&config(3, 7), &items, now);

        assert_eq!(decision.dated_expiring_soon, vec!["A"]);
    }

    #[test]
    fn test_zero_threshold_includes_only_today() {
        let now = midnight("2024-06-10");
        let items = vec![dated("today", "2024-06-10"), dated("tomorrow", "2024-06-11")];

        let decision = evaluate_user(&config(0, 7), &items, now);

        assert_eq!(decision.dated_expiring_soon, vec!["today"]);
    }

    #[test]
    fn test_stale_cutoff_is_inclusive() {
        let now = midnight("2024-06-10");
        let items = vec![
            perishable("C", midnight("2024-06-03")),
            perishable("D", midnight("2024-06-04")),
        ];

        let decision = evaluate_user(&config(3, 7), &items, now);

        assert_eq!(decision.perishable_stale, vec!["C"]);
        assert!(decision.dated_expiring_soon.is_empty());
    }

    #[test]
    fn test_stale_cutoff_ignores_time_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 1, 0, 0).unwrap();
        let items = vec![perishable(
            "late",
            Utc.with_ymd_and_hms(2024, 6, 3, 23, 59, 0).unwrap(),
        )];

        let decision = evaluate_user(&config(3, 7), &items, now);

        assert_eq!(decision.perishable_stale, vec!["late"]);
    }

    #[test]
    fn test_undated_non_perishable_never_qualifies() {
        let now = midnight("2024-06-10");
        let item = PantryItem {
            expiry_date: None,
            added_at: Some(midnight("2020-01-01")),
            ..dated("rice", "2000-01-01")
        };

        let decision = evaluate_user(&config(3, 7), &[item], now);

        assert!(decision.is_empty());
    }

    #[test]
    fn test_perishable_without_added_at_is_ineligible() {
        let now = midnight("2024-06-10");
        let item = PantryItem {
            added_at: None,
            ..perishable("herbs", midnight("2024-01-01"))
        };

        let decision = evaluate_user(&config(3, 7), &[item], now);

        assert!(decision.is_empty());
    }

    #[test]
    fn test_item_can_land_in_both_lists_in_input_order() {
        let now = midnight("2024-06-10");
        let both = PantryItem {
            expiry_date: Some(date("2024-06-11")),
            ..perishable("milk", midnight("2024-05-01"))
        };
        let items = vec![dated("yogurt", "2024-06-12"), both.clone(), both];

        let decision = evaluate_user(&config(3, 7), &items, now);

        assert_eq!(decision.dated_expiring_soon, vec!["yogurt", "milk", "milk"]);
        assert_eq!(decision.perishable_stale, vec!["milk", "milk"]);
    }

    #[test]
    fn test_huge_thresholds_saturate() {
        let now = midnight("2024-06-10");
        let items = vec![
            dated("far", "2200-01-01"),
            perishable("old", midnight("1970-01-01")),
        ];

        let decision = evaluate_user(&config(u32::MAX, u32::MAX), &items, now);

        assert_eq!(decision.dated_expiring_soon, vec!["far"]);
        assert!(decision.perishable_stale.is_empty());
    }

    #[test]
    fn test_build_notification_none_when_empty() {
        assert_eq!(build_notification(&ReminderDecision::default()), None);
    }

    #[test]
    fn test_build_notification_lists_first_three_names() {
        let decision = ReminderDecision {
            dated_expiring_soon: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            perishable_stale: vec![],
        };

        let payload = build_notification(&decision).unwrap();

        assert_eq!(payload.title, "Pantry reminder");
        assert_eq!(payload.body, "4 item(s) nearing expiry: A, B, C");
        assert_eq!(payload.priority, NotificationPriority::High);
    }

    #[test]
    fn test_build_notification_joins_both_clauses() {
        let decision = ReminderDecision {
            dated_expiring_soon: vec!["Milk".to_string()],
            perishable_stale: vec!["Basil".to_string(), "Lettuce".to_string()],
        };

        let payload = build_notification(&decision).unwrap();

        assert_eq!(
            payload.body,
            "1 item(s) nearing expiry: Milk | 2 perishable item(s) in pantry for a while: Basil, Lettuce"
        );
    }

    #[test]
    fn test_build_notification_stale_only() {
        let decision = ReminderDecision {
            dated_expiring_soon: vec![],
            perishable_stale: vec!["Basil".to_string()],
        };

        let payload = build_notification(&decision).unwrap();

        assert_eq!(
            payload.body,
            "1 perishable item(s) in pantry for a while: Basil"
        );
    }

    struct FakeUsers(Vec<PantryUser>);

    impl PantryUserRepository for FakeUsers {
        async fn list_users(&self) -> Result<Vec<PantryUser>, CoreError> {
            Ok(self.0.clone())
        }

        async fn get_user(&self, uid: &str) -> Result<Option<PantryUser>, CoreError> {
            Ok(self.0.iter().find(|u| u.uid == uid).cloned())
        }
    }

    #[derive(Default)]
    struct FakeInventory(HashMap<String, Result<Vec<PantryItem>, CoreError>>);

    impl PantryItemRepository for FakeInventory {
        async fn fetch_non_archived_items(&self, uid: &str) -> Result<Vec<PantryItem>, CoreError> {
            self.0.get(uid).cloned().unwrap_or_else(|| Ok(vec![]))
        }
    }

    #[derive(Default)]
    struct FakeTokens(HashMap<String, Result<Vec<String>, CoreError>>);

    impl DeviceTokenRepository for FakeTokens {
        async fn fetch_device_tokens(&self, uid: &str) -> Result<Vec<String>, CoreError> {
            self.0.get(uid).cloned().unwrap_or_else(|| Ok(vec![]))
        }
    }

    /// Replies per token: tokens starting with "bad" fail, "down" makes the
    /// whole call error.
    #[derive(Default)]
    struct FakeNotifier {
        calls: Mutex<Vec<(Vec<String>, NotificationPayload)>>,
    }

    impl Notifier for FakeNotifier {
        async fn send_batch(
            &self,
            tokens: &[String],
            payload: &NotificationPayload,
        ) -> Result<DispatchReport, CoreError> {
            self.calls
                .lock()
                .unwrap()
                .push((tokens.to_vec(), payload.clone()));

            if tokens.iter().any(|t| t == "down") {
                return Err(CoreError::ExternalServiceError("unreachable".to_string()));
            }

            Ok(DispatchReport::from_outcomes(
                tokens
                    .iter()
                    .map(|t| TokenOutcome {
                        token: t.clone(),
                        delivered: !t.starts_with("bad"),
                        error: None,
                    })
                    .collect(),
            ))
        }
    }

    fn user(uid: &str) -> PantryUser {
        PantryUser {
            uid: uid.to_string(),
            config: UserConfig::default(),
        }
    }

    fn tokens(entries: &[(&str, &[&str])]) -> FakeTokens {
        FakeTokens(
            entries
                .iter()
                .map(|(uid, t)| {
                    (
                        uid.to_string(),
                        Ok(t.iter().map(|s| s.to_string()).collect()),
                    )
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_sweep_aggregates_partial_failure_and_continues() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("alice"), user("bob")]);
        let inventory = FakeInventory(HashMap::from([
            ("alice".to_string(), Ok(vec![dated("Milk", "2024-06-11")])),
            ("bob".to_string(), Ok(vec![dated("Eggs", "2024-06-30")])),
        ]));
        let device_tokens = tokens(&[("alice", &["t1", "t2", "bad-t3"]), ("bob", &["t4"])]);
        let notifier = FakeNotifier::default();

        let result = sweep(&users, &inventory, &device_tokens, &notifier, now, None)
            .await
            .unwrap();

        assert_eq!(
            result,
            SweepResult {
                users_evaluated: 2,
                notifications_attempted: 1,
                success_count: 2,
                failure_count: 1,
            }
        );

        let calls = notifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.body, "1 item(s) nearing expiry: Milk");
    }

    #[tokio::test]
    async fn test_sweep_skips_user_without_items_or_tokens() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("empty"), user("no-tokens")]);
        let inventory = FakeInventory(HashMap::from([(
            "no-tokens".to_string(),
            Ok(vec![dated("Milk", "2024-06-10")]),
        )]));
        let notifier = FakeNotifier::default();

        let result = sweep(
            &users,
            &inventory,
            &FakeTokens::default(),
            &notifier,
            now,
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.users_evaluated, 2);
        assert_eq!(result.notifications_attempted, 0);
        assert!(notifier.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_dispatch_error_counts_tokens_as_failures() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("alice"), user("bob")]);
        let inventory = FakeInventory(HashMap::from([
            ("alice".to_string(), Ok(vec![dated("Milk", "2024-06-11")])),
            ("bob".to_string(), Ok(vec![dated("Eggs", "2024-06-12")])),
        ]));
        let device_tokens = tokens(&[("alice", &["down", "x"]), ("bob", &["t4"])]);
        let notifier = FakeNotifier::default();

        let result = sweep(&users, &inventory, &device_tokens, &notifier, now, None)
            .await
            .unwrap();

        assert_eq!(result.notifications_attempted, 2);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failure_count, 2);
    }

    #[tokio::test]
    async fn test_sweep_inventory_error_skips_only_that_user() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("broken"), user("bob")]);
        let inventory = FakeInventory(HashMap::from([
            (
                "broken".to_string(),
                Err(CoreError::InternalServerError),
            ),
            ("bob".to_string(), Ok(vec![dated("Eggs", "2024-06-12")])),
        ]));
        let device_tokens = tokens(&[("broken", &["t1"]), ("bob", &["t4"])]);
        let notifier = FakeNotifier::default();

        let result = sweep(&users, &inventory, &device_tokens, &notifier, now, None)
            .await
            .unwrap();

        assert_eq!(result.users_evaluated, 1);
        assert_eq!(result.notifications_attempted, 1);
        assert_eq!(result.success_count, 1);
    }

    #[tokio::test]
    async fn test_sweep_token_read_error_counts_user_but_skips_dispatch() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("a"), user("b")]);
        let inventory = FakeInventory(HashMap::from([
            ("a".to_string(), Ok(vec![dated("Milk", "2024-06-11")])),
            ("b".to_string(), Ok(vec![dated("Eggs", "2024-06-12")])),
        ]));
        let device_tokens = FakeTokens(HashMap::from([
            ("a".to_string(), Err(CoreError::InternalServerError)),
            ("b".to_string(), Ok(vec!["t4".to_string()])),
        ]));
        let notifier = FakeNotifier::default();

        let result = sweep(&users, &inventory, &device_tokens, &notifier, now, None)
            .await
            .unwrap();

        assert_eq!(result.users_evaluated, 2);
        assert_eq!(result.notifications_attempted, 1);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failure_count, 0);

        let calls = notifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec!["t4".to_string()]);
    }

    #[tokio::test]
    async fn test_sweep_restricted_to_one_uid() {
        let now = midnight("2024-06-10");
        let users = FakeUsers(vec![user("alice"), user("bob")]);
        let inventory = FakeInventory(HashMap::from([
            ("alice".to_string(), Ok(vec![dated("Milk", "2024-06-11")])),
            ("bob".to_string(), Ok(vec![dated("Eggs", "2024-06-12")])),
        ]));
        let device_tokens = tokens(&[("alice", &["t1"]), ("bob", &["t4"])]);
        let notifier = FakeNotifier::default();

        let result = sweep(
            &users,
            &inventory,
            &device_tokens,
            &notifier,
            now,
            Some("bob"),
        )
        .await
        .unwrap();

        assert_eq!(result.users_evaluated, 1);
        assert_eq!(result.success_count, 1);
        assert_eq!(notifier.calls.lock().unwrap()[0].0, vec!["t4".to_string()]);
    }

    #[tokio::test]
    async fn test_sweep_unknown_uid_evaluates_nobody() {
        let users = FakeUsers(vec![user("alice")]);
        let notifier = FakeNotifier::default();

        let result = sweep(
            &users,
            &FakeInventory::default(),
            &FakeTokens::default(),
            &notifier,
            midnight("2024-06-10"),
            Some("ghost"),
        )
        .await
        .unwrap();

        assert_eq!(result, SweepResult::default());
    }

    fn mock_service(
        users: MockPantryUserRepository,
        debug_uids: Vec<String>,
    ) -> Service<
        MockPantryUserRepository,
        MockPantryItemRepository,
        MockDeviceTokenRepository,
        MockNotifier,
        MockLLMClient,
    > {
        Service::new(
            users,
            MockPantryItemRepository::new(),
            MockDeviceTokenRepository::new(),
            MockNotifier::new(),
            MockLLMClient::new(),
            PantryPolicy::new(debug_uids),
        )
    }

    #[tokio::test]
    async fn test_debug_sweep_rejects_caller_not_on_allow_list() {
        // No expectations: any repository call would panic.
        let service = mock_service(MockPantryUserRepository::new(), vec!["tester".to_string()]);

        let result = service
            .run_debug_sweep(Identity::new("intruder"), midnight("2024-06-10"))
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_debug_sweep_looks_up_only_the_caller() {
        let mut users = MockPantryUserRepository::new();
        users
            .expect_get_user()
            .withf(|uid| uid.to_string() == "tester")
            .times(1)
            .returning(|_| Box::pin(async { Ok(None) }));

        let service = mock_service(users, vec!["tester".to_string()]);

        let result = service
            .run_debug_sweep(Identity::new("tester"), midnight("2024-06-10"))
            .await
            .unwrap();

        assert_eq!(result, SweepResult::default());
    }
}
