//! LogSource trait: the read side of the log API. Enables fake injection for testing.

use std::sync::Arc;

use async_trait::async_trait;
use logtail_core::Target;

use crate::error::FetchError;

#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read the current content of `target`.
    async fn fetch(&self, target: &Target) -> Result<String, FetchError>;

    /// List available targets in server order.
    async fn list_targets(&self) -> Result<Vec<String>, FetchError>;
}

#[async_trait]
impl<T: LogSource + ?Sized> LogSource for Arc<T> {
    async fn fetch(&self, target: &Target) -> Result<String, FetchError> {
        (**self).fetch(target).await
    }

    async fn list_targets(&self) -> Result<Vec<String>, FetchError> {
        (**self).list_targets().await
    }
}
