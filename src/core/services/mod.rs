//! Business logic services
//!
//! Pure functions over domain models. Persistence goes through the port
//! traits in `core::ports`; nothing here touches the filesystem directly.

pub mod intervals;
pub mod rollup;
pub mod tree;
