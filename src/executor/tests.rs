//! Executor Module Tests
//!
//! ## Test Scopes
//! - **Registry**: Registration, lookup, payload delivery and failure propagation.
//! - **Queue**: Non-blocking submission, capacity and closed-queue reporting.
//! - **Executor**: Workers drain the queue, count outcomes and stop when senders are gone.

#[cfg(test)]
mod tests {
    use crate::error::QueueError;
    use crate::executor::executor::TaskExecutor;
    use crate::executor::queue::JobQueue;
    use crate::executor::registry::TaskHandlerRegistry;
    use crate::executor::types::{Task, TaskId};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn task(id: &str, handler: &str, payload: serde_json::Value) -> Task {
        Task::new(TaskId::for_request(id), handler, payload)
    }

    // ============================================================
    // TEST 1: TaskHandlerRegistry - Registration and Execution
    // ============================================================

    #[tokio::test]
    async fn test_registry_register_and_execute() {
        // ARRANGE: Create registry and call counter
        let registry = TaskHandlerRegistry::new();
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        // ACT: Register handler
        registry.register("test_handler", move |_task| {
            let count = call_count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        // ASSERT: Handler is registered
        assert!(registry.has_handler("test_handler"));
        assert_eq!(registry.handler_count(), 1);
        assert_eq!(registry.list_handlers(), vec!["test_handler".to_string()]);

        // ACT: Execute task
        let result = registry
            .execute(&task("1", "test_handler", serde_json::json!({"test": "data"})))
            .await;

        // ASSERT: Handler was called
        assert!(result.is_ok());
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_registry_unknown_handler_returns_error() {
        let registry = TaskHandlerRegistry::new();

        let result = registry
            .execute(&task("1", "non_existent_handler", serde_json::json!({})))
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown task handler"));
    }

    #[tokio::test]
    async fn test_registry_handler_can_fail() {
        let registry = TaskHandlerRegistry::new();
        registry.register("failing_handler", |_task| async {
            Err(anyhow::anyhow!("Intentional error"))
        });

        let result = registry
            .execute(&task("1", "failing_handler", serde_json::json!({})))
            .await;

        assert!(result.unwrap_err().to_string().contains("Intentional error"));
    }

    #[tokio::test]
    async fn test_registry_handler_receives_task() {
        // ARRANGE
        let registry = TaskHandlerRegistry::new();
        let received = Arc::new(tokio::sync::Mutex::new(None));
        let received_clone = received.clone();

        registry.register("payload_handler", move |task| {
            let received = received_clone.clone();
            async move {
                *received.lock().await = Some(task);
                Ok(())
            }
        });

        // ACT
        registry
            .execute(&task("t9", "payload_handler", serde_json::json!({"id": "t9", "data": "text"})))
            .await
            .unwrap();

        // ASSERT
        let received = received.lock().await;
        let task = received.as_ref().expect("handler was not called");
        assert_eq!(task.task_id.as_str(), "task_t9");
        assert_eq!(task.payload["data"], "text");
    }

    // ============================================================
    // TEST 2: TaskId
    // ============================================================

    #[test]
    fn test_task_id_is_derived_from_request_id() {
        assert_eq!(TaskId::for_request("t3").as_str(), "task_t3");
        assert_eq!(TaskId::for_request("t3"), TaskId::for_request("t3"));
        assert_eq!(TaskId::for_request("abc").to_string(), "task_abc");
    }

    // ============================================================
    // TEST 3: JobQueue
    // ============================================================

    #[tokio::test]
    async fn test_queue_submit_does_not_wait_for_consumers() {
        let (queue, receiver) = JobQueue::bounded(4);

        let task_id = queue.submit(task("1", "h", serde_json::json!(null))).unwrap();

        assert_eq!(task_id.as_str(), "task_1");
        assert_eq!(queue.pending(), 1);
        let received = receiver.next().await.unwrap();
        assert_eq!(received.task_id, task_id);
        assert_eq!(queue.pending(), 0);
    }

    #[tokio::test]
    async fn test_queue_full_is_reported() {
        let (queue, _receiver) = JobQueue::bounded(1);

        queue.submit(task("1", "h", serde_json::json!(null))).unwrap();
        let result = queue.submit(task("2", "h", serde_json::json!(null)));

        assert_eq!(result.unwrap_err(), QueueError::Full);
    }

    #[tokio::test]
    async fn test_queue_closed_is_reported() {
        let (queue, receiver) = JobQueue::bounded(1);

        receiver.close().await;
        let result = queue.submit(task("1", "h", serde_json::json!(null)));

        assert_eq!(result.unwrap_err(), QueueError::Closed);
        assert!(queue.is_closed());
    }

    // ============================================================
    // TEST 4: TaskExecutor
    // ============================================================

    #[tokio::test]
    async fn test_executor_runs_every_queued_task() {
        // ARRANGE
        let registry = TaskHandlerRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        registry.register("count", move |_task| {
            let seen = seen_clone.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        registry.register("fail", |_task| async { Err(anyhow::anyhow!("boom")) });

        let (queue, receiver) = JobQueue::bounded(32);
        let executor = TaskExecutor::new(receiver, registry, 3);

        for i in 0..10 {
            queue.submit(task(&i.to_string(), "count", serde_json::json!(i))).unwrap();
        }
        queue.submit(task("x", "fail", serde_json::json!(null))).unwrap();
        queue.submit(task("y", "missing", serde_json::json!(null))).unwrap();

        // ACT: drop the only sender so workers exit after draining
        drop(queue);
        let handles = executor.clone().start();
        for handle in handles {
            tokio::time::timeout(Duration::from_secs(5), handle)
                .await
                .expect("worker did not stop")
                .unwrap();
        }

        // ASSERT
        assert_eq!(seen.load(Ordering::SeqCst), 10);
        assert_eq!(executor.completed_count(), 10);
        assert_eq!(executor.failed_count(), 2);
    }

    #[tokio::test]
    async fn test_single_worker_preserves_submission_order() {
        let registry = TaskHandlerRegistry::new();
        let order = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let order_clone = order.clone();
        registry.register("record", move |task| {
            let order = order_clone.clone();
            async move {
                order.lock().await.push(task.task_id.0);
                Ok(())
            }
        });

        let (queue, receiver) = JobQueue::bounded(8);
        for id in ["a", "b", "c"] {
            queue.submit(task(id, "record", serde_json::json!(null))).unwrap();
        }
        drop(queue);

        for handle in TaskExecutor::new(receiver, registry, 1).start() {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().await, vec!["task_a", "task_b", "task_c"]);
    }

    #[tokio::test]
    async fn test_close_stops_idle_workers_while_senders_remain() {
        // ARRANGE: one worker blocked on an empty queue, sender still alive
        let registry = TaskHandlerRegistry::new();
        let (queue, receiver) = JobQueue::bounded(4);
        let handles = TaskExecutor::new(receiver.clone(), registry, 1).start();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // ACT
        let closed = tokio::time::timeout(Duration::from_secs(2), receiver.close()).await;

        // ASSERT
        assert!(closed.is_ok(), "close() blocked behind an idle worker");
        assert!(receiver.is_closed());
        for handle in handles {
            tokio::time::timeout(Duration::from_secs(2), handle)
                .await
                .expect("worker did not stop")
                .unwrap();
        }
        assert_eq!(
            queue.submit(task("late", "h", serde_json::json!(null))).unwrap_err(),
            QueueError::Closed
        );
    }

    #[tokio::test]
    async fn test_close_still_delivers_queued_tasks() {
        let (queue, receiver) = JobQueue::bounded(4);
        queue.submit(task("a", "h", serde_json::json!(null))).unwrap();
        queue.submit(task("b", "h", serde_json::json!(null))).unwrap();

        receiver.close().await;

        assert_eq!(receiver.next().await.unwrap().task_id.as_str(), "task_a");
        assert_eq!(receiver.next().await.unwrap().task_id.as_str(), "task_b");
        assert!(receiver.next().await.is_none());
    }
}
