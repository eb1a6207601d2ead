//! File-backed preference store.
//!
//! All preferences live in one JSON object inside a directory opened with
//! capability-based filesystem access. Each write rewrites the whole file
//! through a temporary sibling and a rename.

use crate::theme::ports::{PreferenceStore, PreferenceStoreError, PreferenceStoreResult};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

/// Name of the preferences file inside the store directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
const PREFERENCES_TEMP_NAME: &str = "preferences.json.tmp";

type PreferenceMap = BTreeMap<String, String>;

/// Preference store persisting a JSON map in a single file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: Arc<Mutex<Dir>>,
}

impl FilePreferenceStore {
    /// Opens a store rooted at `path`, which must be an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceStoreError::Storage`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> PreferenceStoreResult<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(PreferenceStoreError::storage)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            dir: Arc::new(Mutex::new(dir)),
        }
    }

    async fn with_dir<F, T>(&self, f: F) -> PreferenceStoreResult<T>
    where
        F: FnOnce(&Dir) -> PreferenceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || {
            let guard = dir
                .lock()
                .map_err(|err| PreferenceStoreError::storage(io::Error::other(err.to_string())))?;
            f(&guard)
        })
        .await
        .map_err(PreferenceStoreError::storage)?
    }
}

fn read_map(dir: &Dir) -> PreferenceStoreResult<PreferenceMap> {
    match dir.read_to_string(PREFERENCES_FILE_NAME) {
        Ok(contents) => serde_json::from_str(&contents)
            .map_err(|err| PreferenceStoreError::Corrupt(err.to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(PreferenceMap::new()),
        Err(err) => Err(PreferenceStoreError::storage(err)),
    }
}

fn write_map(dir: &Dir, map: &PreferenceMap) -> PreferenceStoreResult<()> {
    let contents = serde_json::to_string_pretty(map).map_err(PreferenceStoreError::storage)?;
    dir.write(PREFERENCES_TEMP_NAME, contents)
        .map_err(PreferenceStoreError::storage)?;
    dir.rename(PREFERENCES_TEMP_NAME, dir, PREFERENCES_FILE_NAME)
        .map_err(PreferenceStoreError::storage)
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> PreferenceStoreResult<Option<String>> {
        let lookup_key = key.to_owned();
        self.with_dir(move |dir| {
            let mut map = read_map(dir)?;
            Ok(map.remove(&lookup_key))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> PreferenceStoreResult<()> {
        let entry = (key.to_owned(), value.to_owned());
        self.with_dir(move |dir| {
            let mut map = read_map(dir)?;
            let (entry_key, entry_value) = entry;
            map.insert(entry_key, entry_value);
            write_map(dir, &map)
        })
        .await
    }
}
