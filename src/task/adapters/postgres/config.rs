//! Connection settings for the `PostgreSQL` task store.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the connection URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the maximum pool size.
pub const POOL_MAX_SIZE_ENV: &str = "CHECKLIST_POOL_MAX_SIZE";
/// Environment variable overriding the pool checkout timeout in milliseconds.
pub const POOL_TIMEOUT_MS_ENV: &str = "CHECKLIST_POOL_TIMEOUT_MS";

/// Errors raised while reading store configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostgresConfigError {
    /// No connection URL was provided.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A setting could not be parsed or is out of range.
    #[error("invalid value '{value}' for {name}")]
    Invalid {
        /// Setting name.
        name: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Configuration for [`super::PostgresTaskRepository`].
///
/// # Examples
///
/// ```
/// use checklist::task::adapters::postgres::PostgresStoreConfig;
/// use std::time::Duration;
///
/// let config = PostgresStoreConfig::new("postgres://localhost/todos")
///     .with_max_pool_size(4)
///     .with_connection_timeout(Duration::from_secs(2));
/// assert_eq!(config.max_pool_size(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresStoreConfig {
    database_url: String,
    max_pool_size: u32,
    connection_timeout: Duration,
}

impl PostgresStoreConfig {
    /// Default maximum number of pooled connections.
    pub const DEFAULT_MAX_POOL_SIZE: u32 = 8;
    /// Default time to wait for a pooled connection.
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: Self::DEFAULT_MAX_POOL_SIZE,
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresConfigError::Missing`] when `DATABASE_URL` is unset,
    /// or [`PostgresConfigError::Invalid`] when an override does not parse or
    /// is zero.
    pub fn from_env() -> Result<Self, PostgresConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PostgresConfigError> {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(PostgresConfigError::Missing(DATABASE_URL_ENV))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(POOL_MAX_SIZE_ENV) {
            config.max_pool_size = parse_setting::<u32>(&raw)
                .filter(|size| *size > 0)
                .ok_or_else(|| invalid(POOL_MAX_SIZE_ENV, raw))?;
        }
        if let Some(raw) = lookup(POOL_TIMEOUT_MS_ENV) {
            let millis = parse_setting::<u64>(&raw)
                .filter(|millis| *millis > 0)
                .ok_or_else(|| invalid(POOL_TIMEOUT_MS_ENV, raw))?;
            config.connection_timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Sets how long an operation waits for a pooled connection.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Checks that the pool settings can be used to build a pool.
    ///
    /// The builder setters accept any value, so configurations assembled in
    /// code are checked here before a pool is created.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresConfigError::Invalid`] when the pool size or the
    /// checkout timeout is zero.
    pub fn validate(&self) -> Result<(), PostgresConfigError> {
        if self.max_pool_size == 0 {
            return Err(invalid(POOL_MAX_SIZE_ENV, self.max_pool_size.to_string()));
        }
        if self.connection_timeout.is_zero() {
            return Err(invalid(
                POOL_TIMEOUT_MS_ENV,
                self.connection_timeout.as_millis().to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

fn parse_setting<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

const fn invalid(name: &'static str, value: String) -> PostgresConfigError {
    PostgresConfigError::Invalid { name, value }
}
