use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

#[cfg_attr(test, mockall::automock)]
pub trait DeviceTokenRepository: Send + Sync {
    /// Returns the push tokens registered for `uid`. Empty tokens are
    /// filtered out.
    fn fetch_device_tokens(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}
