//! Employee record command - add records, rows, and run the save checks

use chrono::NaiveDate;

use crate::api;
use crate::cli::app::EmployeeAction;
use crate::core::models::{EmployeeRecord, ResidenceCost, SponsorshipPeriod};
use crate::output::{self, OperationResult, OutputMode};
use crate::storage::EmployeeStore;

/// Handle employee subcommands
///
/// Every mutation goes through the save hook, so incomplete, inverted, or
/// overlapping periods are rejected before anything lands on disk.
pub fn employee(action: EmployeeAction, mode: OutputMode) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let store = EmployeeStore::new(&root);

    match action {
        EmployeeAction::Add {
            id,
            name,
            residence_start,
            residence_end,
        } => {
            let mut record = EmployeeRecord::new(id, name);
            record.residence_start = parse_date(residence_start.as_deref())?;
            record.residence_end = parse_date(residence_end.as_deref())?;

            let data = api::save_employee(&store, &mut record)
                .map_err(|e| anyhow::anyhow!("{}", e.message))?;
            output::render_employee_check(&data, true, mode);
            Ok(())
        },

        EmployeeAction::Sponsor { id, sponsor, start, end } => {
            let mut record = load(&store, &id)?;
            record.sponsorships.push(SponsorshipPeriod {
                sponsor,
                start: parse_date(Some(&start))?,
                end: parse_date(Some(&end))?,
            });

            let data = api::save_employee(&store, &mut record)
                .map_err(|e| anyhow::anyhow!("{}", e.message))?;
            output::render_employee_check(&data, true, mode);
            Ok(())
        },

        EmployeeAction::Cost { id, description, amount } => {
            let mut record = load(&store, &id)?;
            record.residence_costs.push(ResidenceCost { description, amount });

            let data = api::save_employee(&store, &mut record)
                .map_err(|e| anyhow::anyhow!("{}", e.message))?;
            output::render_employee_check(&data, true, mode);
            Ok(())
        },

        EmployeeAction::Show { id } => {
            let record = load(&store, &id)?;
            match mode {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputMode::Human => {
                    println!("{} ({})", record.employee_name, record.id);
                    match (record.residence_start, record.residence_end) {
                        (Some(s), Some(e)) => println!("  residence: {s} -> {e}"),
                        _ => println!("  residence: not set"),
                    }
                    for (idx, row) in record.sponsorships.iter().enumerate() {
                        let start = row.start.map_or_else(|| "?".to_string(), |d| d.to_string());
                        let end = row.end.map_or_else(|| "?".to_string(), |d| d.to_string());
                        println!("  sponsorship #{}: {} ({start} -> {end})", idx + 1, row.sponsor);
                    }
                    for row in &record.residence_costs {
                        println!("  cost: {} = {:.2}", row.description, row.amount);
                    }
                    println!("  total cost: {:.2}", record.total_cost);
                },
            }
            Ok(())
        },

        EmployeeAction::List => {
            let ids = store.list_ids()?;
            if mode == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(&ids)?);
            } else if ids.is_empty() {
                OperationResult {
                    success: true,
                    message: "No employee records.".to_string(),
                }
                .render(mode);
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
            Ok(())
        },
    }
}

fn load(store: &EmployeeStore, id: &str) -> anyhow::Result<EmployeeRecord> {
    store.get(id)?.ok_or_else(|| anyhow::anyhow!("Employee not found: {id}"))
}

fn parse_date(value: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    value
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid date: {raw} (expected YYYY-MM-DD)"))
        })
        .transpose()
}
