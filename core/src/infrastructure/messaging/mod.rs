pub mod fcm_notifier;
pub mod google_auth;
