use super::store::ResultStore;
use crate::error::StoreError;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;

/// Redis-backed result store.
///
/// `redis::Client::open` only validates the URL; the connection is opened by the first
/// operation and kept until `close()`.
pub struct RedisResultStore {
    client: redis::Client,
    connection: Mutex<Option<ConnectionManager>>,
    timeout: Duration,
}

impl RedisResultStore {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            connection: Mutex::new(None),
            timeout,
        })
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    /// Returns the shared connection, opening it on first use.
    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let mut guard = self.connection.lock().await;

        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        tracing::info!("Connecting to result store");
        let conn = self
            .bounded(ConnectionManager::new(self.client.clone()))
            .await?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn bounded<F, T>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))
    }
}

#[async_trait]
impl ResultStore for RedisResultStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value = self.bounded(conn.get::<_, Option<String>>(key)).await??;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        self.bounded(conn.set::<_, _, ()>(key, value)).await??;
        tracing::debug!("Stored result under {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        self.bounded(conn.del::<_, ()>(key)).await??;
        Ok(())
    }

    async fn close(&self) {
        if self.connection.lock().await.take().is_some() {
            tracing::info!("Closed result store connection");
        }
    }
}
