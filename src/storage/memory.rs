use super::store::ResultStore;
use crate::error::StoreError;

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-process result store.
///
/// Entries survive `close()`; only the simulated connection state is reset, so tests
/// can observe the lazy-connect contract the Redis backend follows.
#[derive(Default)]
pub struct MemoryResultStore {
    entries: DashMap<String, String>,
    connected: AtomicBool,
    connections_opened: AtomicUsize,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// How many times a connection has been (re)established.
    pub fn connections_opened(&self) -> usize {
        self.connections_opened.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_connected(&self) {
        if !self.connected.swap(true, Ordering::SeqCst) {
            self.connections_opened.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ensure_connected();
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.ensure_connected();
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.ensure_connected();
        self.entries.remove(key);
        Ok(())
    }

    async fn close(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}
