//! Bounded Job Queue
//!
//! A thin wrapper over a tokio mpsc channel. The sending half is cloned into every
//! component that schedules work; the receiving half is shared by all workers.

use super::types::{Task, TaskId};
use crate::error::QueueError;

use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};

#[derive(Clone)]
pub struct JobQueue {
    sender: mpsc::Sender<Task>,
}

/// The consuming end of a `JobQueue`, cloneable across workers.
///
/// Closing goes through a watch flag rather than the receive lock, since an idle worker
/// holds that lock while it waits.
#[derive(Clone)]
pub struct QueueReceiver {
    inner: Arc<Mutex<mpsc::Receiver<Task>>>,
    closed: Arc<watch::Sender<bool>>,
}

impl JobQueue {
    pub fn bounded(capacity: usize) -> (Self, QueueReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self { sender },
            QueueReceiver {
                inner: Arc::new(Mutex::new(receiver)),
                closed: Arc::new(watch::Sender::new(false)),
            },
        )
    }

    /// Enqueues without waiting. A full or closed queue is reported immediately.
    pub fn submit(&self, task: Task) -> Result<TaskId, QueueError> {
        let task_id = task.task_id.clone();

        match self.sender.try_send(task) {
            Ok(()) => {
                tracing::debug!("Queued task {}", task_id);
                Ok(task_id)
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(QueueError::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(QueueError::Closed),
        }
    }

    /// Number of tasks waiting to be picked up.
    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl QueueReceiver {
    /// Waits for the next task. `None` once every `JobQueue` handle is dropped, or once
    /// the receiver is closed and the tasks already queued are drained.
    pub async fn next(&self) -> Option<Task> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow_and_update() {
            return self.inner.lock().await.try_recv().ok();
        }

        tokio::select! {
            task = async { self.inner.lock().await.recv().await } => task,
            _ = async { let _ = closed.wait_for(|closed| *closed).await; } => self.inner.lock().await.try_recv().ok(),
        }
    }

    /// Stops accepting new tasks and wakes idle workers. Already queued tasks are still
    /// delivered.
    pub async fn close(&self) {
        self.closed.send_replace(true);
        self.inner.lock().await.close();
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}
