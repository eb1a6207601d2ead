//! In-memory adapter for the task store.
//!
//! Suitable for tests and single-process use without a database.

mod task;

pub use task::InMemoryTaskRepository;
