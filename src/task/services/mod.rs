//! Application services for the task store.

mod store;

pub use store::{TaskSnapshotView, TaskStoreError, TaskStoreResult, TaskStoreService};
