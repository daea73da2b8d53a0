//! Result Store Module
//!
//! A key-value store mapping task ids to serialized job records. The asynchronous path
//! writes here when a background job finishes and the polling endpoint reads from here.
//!
//! ## Core Concepts
//! - **Injection**: The store is constructed once at startup and handed to the orchestrator
//!   as an `Arc<dyn ResultStore>`; there is no process-global connection.
//! - **Lazy connection**: Backends connect on first use and reconnect after `close()`.
//! - **No expiry**: Entries live until deleted or overwritten.
//!
//! ## Submodules
//! - **`store`**: The `ResultStore` trait.
//! - **`redis_store`**: Redis-backed store used in production.
//! - **`memory`**: In-process store used in tests and single-node deployments.

pub mod memory;
pub mod redis_store;
pub mod store;

#[cfg(test)]
mod tests;
