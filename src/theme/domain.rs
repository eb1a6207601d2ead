//! Theme values.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Key under which the theme preference is stored.
pub const THEME_PREFERENCE_KEY: &str = "@todo_app_theme";

/// Colour scheme selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light scheme, used when nothing has been saved.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Returns the stored string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns whether this is the dark theme.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl TryFrom<&str> for Theme {
    type Error = ParseThemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError(value.to_owned())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored value is not a known theme.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct ParseThemeError(pub String);
