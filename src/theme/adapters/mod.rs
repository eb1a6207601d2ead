//! Preference store adapters.
//!
//! - [`memory::InMemoryPreferenceStore`]: process-local map
//! - [`file::FilePreferenceStore`]: JSON file in a capability-scoped directory

pub mod file;
pub mod memory;
