use crate::error::StoreError;

use async_trait::async_trait;

/// Get/set/delete over string keys and string values.
///
/// Writes to the same key are last-write-wins; implementations add no ordering.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Releases the underlying connection. The next operation reconnects.
    async fn close(&self);
}
