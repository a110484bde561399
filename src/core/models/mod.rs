//! Domain models for planroll
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`TaskNode`] - one work item in a project's task forest
//! - [`DateInterval`] - one bounded date period from a child-row collection
//! - [`EmployeeRecord`] - an employee with residence/sponsorship periods

mod employee;
mod interval;
mod task;

pub use employee::{EmployeeRecord, ResidenceCost, SponsorshipPeriod};
pub use interval::DateInterval;
pub use task::{Priority, TaskNode, TaskStatus};
