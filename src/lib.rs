//! Checklist: a personal task list service.
//!
//! Users create, complete, edit, filter, and bulk-clear short text items.
//! Tasks live in a central store; the light/dark theme preference is kept
//! per device.
//!
//! # Architecture
//!
//! Checklist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, files, memory)
//!
//! # Modules
//!
//! - [`task`]: Task store commands, ordering, and the filtered view projection
//! - [`theme`]: Theme preference storage and toggling

pub mod task;
pub mod theme;
