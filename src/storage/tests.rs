//! Storage Module Tests
//!
//! ## Test Scopes
//! - **MemoryResultStore**: Get/set/delete semantics, overwrite and the lazy-connect contract.
//! - **RedisResultStore**: Construction and failure behaviour without a running server.
//!
//! *Note: Nothing here needs a Redis instance.*

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::storage::memory::MemoryResultStore;
    use crate::storage::redis_store::RedisResultStore;
    use crate::storage::store::ResultStore;
    use std::sync::Arc;
    use std::time::Duration;

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[tokio::test]
    async fn test_memory_store_set_and_get() {
        let store = MemoryResultStore::new();

        store.set("task_1", r#"{"status":"completed"}"#.to_string()).await.unwrap();

        let value = store.get("task_1").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"status":"completed"}"#));
    }

    #[tokio::test]
    async fn test_memory_store_missing_key_is_none() {
        let store = MemoryResultStore::new();

        assert!(store.get("task_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_overwrite_is_last_write_wins() {
        let store = MemoryResultStore::new();

        store.set("task_1", "first".to_string()).await.unwrap();
        store.set("task_1", "second".to_string()).await.unwrap();

        assert_eq!(store.get("task_1").await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemoryResultStore::new();
        store.set("task_1", "value".to_string()).await.unwrap();

        store.delete("task_1").await.unwrap();

        assert!(store.get("task_1").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_connects_lazily_and_reconnects_after_close() {
        let store = MemoryResultStore::new();
        assert!(!store.is_connected());
        assert_eq!(store.connections_opened(), 0);

        store.set("k", "v".to_string()).await.unwrap();
        store.get("k").await.unwrap();
        assert!(store.is_connected());
        assert_eq!(store.connections_opened(), 1);

        store.close().await;
        assert!(!store.is_connected());

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.connections_opened(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_concurrent_writers_to_distinct_keys() {
        let store = Arc::new(MemoryResultStore::new());

        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.set(&format!("task_{}", i), i.to_string()).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 50);
        assert_eq!(store.get("task_7").await.unwrap().as_deref(), Some("7"));
    }

    // ============================================================
    // REDIS STORE
    // ============================================================

    #[test]
    fn test_redis_store_rejects_invalid_url() {
        let result = RedisResultStore::new("not a url", Duration::from_secs(1));

        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[tokio::test]
    async fn test_redis_store_does_not_connect_on_construction() {
        let store = RedisResultStore::new("redis://127.0.0.1:1", Duration::from_secs(1)).unwrap();

        assert!(!store.is_connected().await);
        store.close().await;
        assert!(!store.is_connected().await);
    }

    #[tokio::test]
    async fn test_redis_store_unreachable_server_is_an_error() {
        let store =
            RedisResultStore::new("redis://127.0.0.1:1", Duration::from_millis(300)).unwrap();

        let result = store.get("task_1").await;

        assert!(result.is_err());
        assert!(!store.is_connected().await);
    }
}
