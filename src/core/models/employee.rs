//! Employee record model
//!
//! An employee carries a single residence period on the record itself plus
//! two child-row collections: sponsorship transfer periods and residence
//! costs. The save hook in storage recomputes the cost total and validates
//! all date periods before anything is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee with residence and sponsorship data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier (e.g. "EMP-7")
    pub id: String,

    /// Full name
    pub employee_name: String,

    /// Residence period start; both-or-neither with `residence_end`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_start: Option<NaiveDate>,

    /// Residence period end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_end: Option<NaiveDate>,

    /// Sponsorship transfer periods; must be pairwise non-overlapping
    #[serde(default, rename = "sponsorship", skip_serializing_if = "Vec::is_empty")]
    pub sponsorships: Vec<SponsorshipPeriod>,

    /// Residence cost rows
    #[serde(default, rename = "residence_cost", skip_serializing_if = "Vec::is_empty")]
    pub residence_costs: Vec<ResidenceCost>,

    /// Sum of residence cost amounts, recomputed on every save
    #[serde(default)]
    pub total_cost: f64,

    /// When this record was created (RFC3339)
    pub created_at: String,
}

impl EmployeeRecord {
    /// Create a new record with empty child rows
    #[must_use]
    pub fn new(id: String, employee_name: String) -> Self {
        Self {
            id,
            employee_name,
            residence_start: None,
            residence_end: None,
            sponsorships: Vec::new(),
            residence_costs: Vec::new(),
            total_cost: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Recompute `total_cost` from the cost rows
    ///
    /// Each amount is rounded to 2 decimals before summing, matching how
    /// the amounts are entered.
    pub fn recompute_total(&mut self) {
        self.total_cost = self
            .residence_costs
            .iter()
            .map(|row| (row.amount * 100.0).round() / 100.0)
            .sum();
    }
}

/// One sponsorship transfer period (child row)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorshipPeriod {
    /// Sponsoring entity
    pub sponsor: String,

    /// Period start; required once the row exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// Period end; required once the row exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

/// One residence cost row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidenceCost {
    /// What the cost covers
    pub description: String,

    /// Amount in the record's currency
    pub amount: f64,
}
