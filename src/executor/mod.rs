//! Background Job Executor Module
//!
//! Runs asynchronous analysis jobs outside the request/response cycle.
//!
//! ## Architecture Overview
//! The executor follows a **push-to-queue, pull-by-worker** model:
//! 1. **Submission**: A handler wraps the work in a `Task` and pushes it onto the bounded
//!    `JobQueue`. Submission never waits for the work itself.
//! 2. **Dispatch**: A fixed pool of workers shares the receiving end of the queue; each
//!    dequeued task is routed by handler name through the `TaskHandlerRegistry`.
//! 3. **Completion**: Handlers record their own outcome (for analysis jobs, in the result
//!    store). The executor only counts and logs results; nothing is retried or cancelled.
//!
//! ## Submodules
//! - **`types`**: Task identifiers and the task envelope.
//! - **`queue`**: The bounded submission queue and its shared receiver.
//! - **`registry`**: Maps handler names (e.g., "analyze_text") to async closures.
//! - **`executor`**: The worker pool.

pub mod executor;
pub mod queue;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;
