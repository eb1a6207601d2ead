//! Per-device theme preference.
//!
//! A light/dark preference stored under a fixed key in a device-local
//! key-value store. Writes replace the previous value; there is no schema or
//! migration.
//!
//! - Domain types in [`domain`]
//! - The key-value port in [`ports`]
//! - In-memory and file-backed stores in [`adapters`]
//! - Load/toggle orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
