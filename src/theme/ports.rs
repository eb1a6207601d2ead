//! Port contract for device-local preference storage.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for preference store operations.
pub type PreferenceStoreResult<T> = Result<T, PreferenceStoreError>;

/// Device-local string key-value store. The last write for a key wins.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> PreferenceStoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> PreferenceStoreResult<()>;
}

/// Errors returned by preference store implementations.
#[derive(Debug, Clone, Error)]
pub enum PreferenceStoreError {
    /// The underlying storage could not be read or written.
    #[error("preference storage failed: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),

    /// Stored data could not be decoded.
    #[error("preference data is corrupt: {0}")]
    Corrupt(String),
}

impl PreferenceStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
