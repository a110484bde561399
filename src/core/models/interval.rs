//! Date interval model
//!
//! A raw date period as it arrives from a child-row collection: either
//! endpoint may still be missing, and the row ordinal is kept so that
//! validation errors can name the offending row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One bounded date period from a row collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    /// Period start (may be unset on an incomplete row)
    pub start: Option<NaiveDate>,

    /// Period end (may be unset on an incomplete row)
    pub end: Option<NaiveDate>,

    /// 1-based row position, used in error messages and as a stable
    /// tie-break when sorting
    pub ordinal: usize,
}

impl DateInterval {
    /// Create an interval from a row's dates and its 1-based position
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, ordinal: usize) -> Self {
        Self { start, end, ordinal }
    }
}
