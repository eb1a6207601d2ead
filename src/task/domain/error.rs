//! Error types for task domain parsing.

use thiserror::Error;

/// Error returned when a raw task identifier is not a valid UUID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed task identifier: '{0}'")]
pub struct ParseTaskIdError(pub String);

/// Error returned while parsing a task filter selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task filter: {0}")]
pub struct ParseTaskFilterError(pub String);
