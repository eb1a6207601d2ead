//! Step definitions for task store behaviour scenarios.

pub mod given;
pub mod world;
