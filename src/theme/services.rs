//! Loading and toggling the saved theme.

use crate::theme::{
    domain::{THEME_PREFERENCE_KEY, Theme},
    ports::{PreferenceStore, PreferenceStoreResult},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads and writes the theme preference through a [`PreferenceStore`].
#[derive(Clone)]
pub struct ThemePreferenceService<S>
where
    S: PreferenceStore,
{
    store: Arc<S>,
}

impl<S> ThemePreferenceService<S>
where
    S: PreferenceStore,
{
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the saved theme, or [`Theme::Light`] when nothing usable is
    /// saved.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from the preference store.
    pub async fn current(&self) -> PreferenceStoreResult<Theme> {
        let Some(saved) = self.store.get(THEME_PREFERENCE_KEY).await? else {
            return Ok(Theme::default());
        };
        match Theme::try_from(saved.as_str()) {
            Ok(theme) => Ok(theme),
            Err(err) => {
                warn!(error = %err, "ignoring unrecognised saved theme");
                Ok(Theme::default())
            }
        }
    }

    /// Switches to the other theme, saves it, and returns it.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from the preference store.
    pub async fn toggle(&self) -> PreferenceStoreResult<Theme> {
        let next = self.current().await?.toggled();
        self.set(next).await?;
        Ok(next)
    }

    /// Saves `theme` as the preference.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from the preference store.
    pub async fn set(&self, theme: Theme) -> PreferenceStoreResult<()> {
        self.store
            .set(THEME_PREFERENCE_KEY, theme.as_str())
            .await?;
        debug!(%theme, "saved theme preference");
        Ok(())
    }
}
