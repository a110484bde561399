//! Date interval validation
//!
//! Rejects incomplete, inverted, or overlapping date periods before a
//! record is persisted. The overlap rule is inclusive: a period ending on
//! day D and another starting on day D count as overlapping. That is a
//! policy decision carried over from existing data, not an accident.

use chrono::NaiveDate;

use crate::core::models::DateInterval;

/// A date-period validation failure
///
/// All variants are user-facing and abort the save; callers decide how to
/// surface them (CLI message, HTTP 400, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A row is missing one or both of its required dates
    #[error("Row #{row}: start and end dates are required")]
    MissingField {
        /// 1-based ordinal of the offending row
        row: usize,
    },

    /// Exactly one endpoint of a single period is set
    #[error("Period is incomplete: set both start and end dates")]
    IncompleteRange,

    /// End date falls before start date
    #[error("{}End date {end} cannot be before start date {start}", row_prefix(.row))]
    InvertedRange {
        /// 1-based row ordinal, None for the single residence period
        row: Option<usize>,
        /// The period's start date
        start: NaiveDate,
        /// The period's end date
        end: NaiveDate,
    },

    /// Two periods intersect under the inclusive rule
    #[error(
        "Periods overlap between row #{first_row} (ends {first_end}) and row #{second_row} (starts {second_start})"
    )]
    OverlappingRange {
        /// Row whose span reaches furthest at the point of conflict
        first_row: usize,
        /// That row's end date
        first_end: NaiveDate,
        /// Row that starts inside the earlier span
        second_row: usize,
        /// That row's start date
        second_start: NaiveDate,
    },
}

fn row_prefix(row: &Option<usize>) -> String {
    row.map_or_else(String::new, |r| format!("Row #{r}: "))
}

/// Validate a single optional period (e.g. the residence dates)
///
/// Both endpoints unset is fine; exactly one set is `IncompleteRange`;
/// both set requires `start <= end` (`end == start` is valid).
pub fn validate_single_period(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (None, None) => Ok(()),
        (Some(_), None) | (None, Some(_)) => Err(ValidationError::IncompleteRange),
        (Some(s), Some(e)) => {
            if e < s {
                Err(ValidationError::InvertedRange {
                    row: None,
                    start: s,
                    end: e,
                })
            } else {
                Ok(())
            }
        },
    }
}

/// Validate a row collection of periods (e.g. sponsorship transfers)
///
/// Every row must carry both dates and satisfy `start <= end`. Across rows,
/// no two periods may overlap under the inclusive rule. The walk tracks a
/// running maximum end date so a short period nested inside an earlier,
/// longer one is still caught. Zero rows validate silently.
pub fn validate_row_set(rows: &[DateInterval]) -> Result<(), ValidationError> {
    let mut bounded = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(start), Some(end)) = (row.start, row.end) else {
            return Err(ValidationError::MissingField { row: row.ordinal });
        };
        if end < start {
            return Err(ValidationError::InvertedRange {
                row: Some(row.ordinal),
                start,
                end,
            });
        }
        bounded.push((start, end, row.ordinal));
    }

    // sort_by_key is stable, so equal (start, end) keep row order
    bounded.sort_by_key(|&(start, end, _)| (start, end));

    let mut furthest: Option<(NaiveDate, usize)> = None;
    for &(start, end, ordinal) in &bounded {
        if let Some((max_end, max_row)) = furthest {
            if start <= max_end {
                return Err(ValidationError::OverlappingRange {
                    first_row: max_row,
                    first_end: max_end,
                    second_row: ordinal,
                    second_start: start,
                });
            }
            if end > max_end {
                furthest = Some((end, ordinal));
            }
        } else {
            furthest = Some((end, ordinal));
        }
    }

    Ok(())
}
