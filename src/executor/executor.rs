//! Worker Pool Implementation
//!
//! Spawns background workers that pull tasks from the shared queue receiver and run
//! them through the `TaskHandlerRegistry`.
//!
//! ## Responsibilities
//! - **Polling**: Waiting on the queue; workers exit once every sender is gone.
//! - **Execution**: Invoking the appropriate handler from the registry.
//! - **Accounting**: Counting completed and failed tasks for logs and tests.

use super::queue::QueueReceiver;
use super::registry::TaskHandlerRegistry;
use super::types::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinHandle;

/// The engine that drives task execution.
pub struct TaskExecutor {
    /// Shared consuming end of the job queue.
    receiver: QueueReceiver,
    /// Registry containing the actual code (closures) for tasks.
    handlers: Arc<TaskHandlerRegistry>,
    /// Number of concurrent workers.
    worker_count: usize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl TaskExecutor {
    pub fn new(
        receiver: QueueReceiver,
        handlers: Arc<TaskHandlerRegistry>,
        worker_count: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            receiver,
            handlers,
            worker_count: worker_count.max(1),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        })
    }

    /// Spawns the workers and returns immediately.
    /// Each worker runs until the queue is closed and drained.
    pub fn start(self: Arc<Self>) -> Vec<JoinHandle<()>> {
        tracing::info!("Starting {} task workers", self.worker_count);

        (0..self.worker_count)
            .map(|worker_id| {
                let executor = self.clone();
                tokio::spawn(async move {
                    executor.worker_loop(worker_id).await;
                })
            })
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    async fn worker_loop(&self, worker_id: usize) {
        tracing::debug!("Worker {} started", worker_id);

        while let Some(task) = self.receiver.next().await {
            tracing::info!(
                "Worker {} picked up task {} (handler: {}, queued {} ms)",
                worker_id,
                task.task_id,
                task.handler,
                now_ms().saturating_sub(task.submitted_at)
            );
            self.execute_task(&task).await;
        }

        tracing::debug!("Worker {} stopped: queue closed", worker_id);
    }

    /// Runs one task. Failures are terminal; nothing is re-queued.
    async fn execute_task(&self, task: &Task) {
        match self.handlers.execute(task).await {
            Ok(()) => {
                self.completed.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Task {} finished", task.task_id);
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                tracing::error!("Task {} failed: {}", task.task_id, e);
            }
        }
    }
}
