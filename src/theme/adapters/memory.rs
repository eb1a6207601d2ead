//! In-memory preference store.

use crate::theme::ports::{PreferenceStore, PreferenceStoreError, PreferenceStoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> PreferenceStoreError {
    PreferenceStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> PreferenceStoreResult<Option<String>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PreferenceStoreResult<()> {
        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
