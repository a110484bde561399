//! Command implementations

mod employee;
mod init;
mod recalc;
#[cfg(feature = "ui")]
mod serve;
mod task;

pub use employee::employee;
pub use init::init;
pub use recalc::recalc;
#[cfg(feature = "ui")]
pub use serve::serve;
pub use task::task;
