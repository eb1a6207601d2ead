//! Task store for the personal task list.
//!
//! Users create, complete, edit, filter, and bulk-clear short text items.
//! The module follows hexagonal architecture:
//!
//! - Domain types and the pure view projection in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
