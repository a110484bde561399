//! Port traits (interfaces) for external dependencies
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. Storage adapters live in the `storage` module; tests
//! supply in-memory implementations.

mod task_repo;

pub use task_repo::TaskRepository;
