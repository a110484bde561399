//! Core domain logic for planroll
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`TaskNode`, `DateInterval`, `EmployeeRecord`)
//! - `services/` - Business logic (interval validation, WBS tree, rollups)
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
