//! Task Handler Registry
//!
//! A dynamic registry that maps string-based task names (e.g., "analyze_text")
//! to executable Rust closures. This keeps the executor generic: it knows how to run
//! a task, not what the task does.

use super::types::*;

use anyhow::Result;
use dashmap::DashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a thread-safe, asynchronous task handler function.
/// It takes a `Task` object and returns a Future that resolves to a `Result<()>`.
pub type TaskHandlerFn =
    Arc<dyn Fn(Task) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// Registry holding the mapping between task names and their implementation.
#[derive(Default)]
pub struct TaskHandlerRegistry {
    handlers: DashMap<String, TaskHandlerFn>,
}

impl TaskHandlerRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a handler function under a specific name, replacing any previous one.
    ///
    /// # Arguments
    /// * `handler_name` - The string identifier for the task (e.g., "analyze_text").
    /// * `handler` - The closure/function that implements the task logic.
    pub fn register<F, Fut>(&self, handler_name: &str, handler: F)
    where
        F: Fn(Task) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        // Box::pin type-erases the concrete future so different handlers share one map.
        let handler_fn: TaskHandlerFn = Arc::new(move |task: Task| {
            Box::pin(handler(task)) as Pin<Box<dyn Future<Output = Result<()>> + Send>>
        });

        self.handlers.insert(handler_name.to_string(), handler_fn);

        tracing::info!("Registered task handler: {}", handler_name);
    }

    /// Looks up the task's handler and executes it.
    ///
    /// # Returns
    /// * `Ok(())` if the handler executed successfully.
    /// * `Err` if the handler failed or if no handler exists for the given name.
    pub async fn execute(&self, task: &Task) -> Result<()> {
        // Clone the Arc out so the map shard is not locked across the await.
        let handler_fn = self
            .handlers
            .get(&task.handler)
            .map(|entry| entry.value().clone());

        match handler_fn {
            Some(handler_fn) => {
                tracing::debug!(
                    "Executing task {} with handler '{}' (payload size: {} bytes)",
                    task.task_id,
                    task.handler,
                    task.payload.to_string().len()
                );
                handler_fn(task.clone()).await
            }
            None => {
                let error = format!("Unknown task handler: {}", task.handler);
                tracing::error!("{}", error);
                Err(anyhow::anyhow!(error))
            }
        }
    }

    /// Returns a list of all registered handler names.
    pub fn list_handlers(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn has_handler(&self, handler_name: &str) -> bool {
        self.handlers.contains_key(handler_name)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}
