//! CLI definitions and entry point

use clap::{Parser, Subcommand};

use crate::output::OutputMode;

use super::commands;

/// planroll - Work-breakdown task planning with parent rollups
#[derive(Parser, Debug)]
#[command(
    name = "planroll",
    version,
    about = "Work-breakdown task planning with parent rollups",
    long_about = "Maintain project task trees with WBS position codes.\n\n\
                  Parent tasks roll up their children's dates, hours, and status.\n\
                  Employee records are checked for incomplete, inverted, or\n\
                  overlapping residence/sponsorship periods before every save."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize planroll in the current directory
    Init {
        /// Force re-initialization
        #[arg(short, long)]
        force: bool,
    },

    /// Manage a project's tasks
    Task {
        /// Project name
        #[arg(short, long)]
        project: String,

        /// Task action to run
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Recalculate parent rollups (one parent, or all with no id)
    Recalc {
        /// Project name
        #[arg(short, long)]
        project: String,

        /// Parent task id; omit to recalculate every parent deepest-first
        parent: Option<String>,
    },

    /// Manage employee records
    Employee {
        /// Employee action to run
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Run the HTTP API server
    #[cfg(feature = "ui")]
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:7878")]
        addr: String,
    },

    /// Show version
    Version,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task subject
        subject: String,

        /// Parent task id (ignored for group tasks)
        #[arg(long)]
        parent: Option<String>,

        /// Create as a group task (rollup target)
        #[arg(short, long)]
        group: bool,

        /// Status: open, working, pending_review, overdue, completed, cancelled
        #[arg(short, long)]
        status: Option<String>,

        /// Priority: low, medium, high, urgent
        #[arg(long)]
        priority: Option<String>,

        /// Planned start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Planned end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Planned hours
        #[arg(long)]
        hours: Option<f64>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List tasks as an indented WBS tree
    List,

    /// Update a task (triggers a parent rollup when the task has one)
    Update {
        /// Task id
        id: String,

        /// New subject
        #[arg(long)]
        subject: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,

        /// New parent id ("" to detach)
        #[arg(long)]
        parent: Option<String>,

        /// New planned start (YYYY-MM-DD, "" clears)
        #[arg(long)]
        start: Option<String>,

        /// New planned end (YYYY-MM-DD, "" clears)
        #[arg(long)]
        end: Option<String>,

        /// New planned hours
        #[arg(long)]
        hours: Option<f64>,

        /// New actual start (YYYY-MM-DD, "" clears)
        #[arg(long)]
        actual_start: Option<String>,

        /// New actual end (YYYY-MM-DD, "" clears)
        #[arg(long)]
        actual_end: Option<String>,
    },

    /// Remove a task (refused while it still has children)
    Remove {
        /// Task id
        id: String,
    },
}

/// Employee subcommands
#[derive(Subcommand, Debug)]
pub enum EmployeeAction {
    /// Create or replace an employee record
    Add {
        /// Employee id (e.g. EMP-7)
        id: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Residence period start (YYYY-MM-DD)
        #[arg(long)]
        residence_start: Option<String>,

        /// Residence period end (YYYY-MM-DD)
        #[arg(long)]
        residence_end: Option<String>,
    },

    /// Add a sponsorship transfer period to an employee
    Sponsor {
        /// Employee id
        id: String,

        /// Sponsoring entity
        #[arg(long)]
        sponsor: String,

        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Period end (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },

    /// Add a residence cost row to an employee
    Cost {
        /// Employee id
        id: String,

        /// What the cost covers
        #[arg(short, long)]
        description: String,

        /// Amount
        #[arg(short, long)]
        amount: f64,
    },

    /// Show an employee record
    Show {
        /// Employee id
        id: String,
    },

    /// List stored employee ids
    List,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Init { force }) => commands::init(force, output_mode),
        Some(Command::Task { project, action }) => commands::task(&project, action, output_mode),
        Some(Command::Recalc { project, parent }) => {
            commands::recalc(&project, parent.as_deref(), output_mode)
        },
        Some(Command::Employee { action }) => commands::employee(action, output_mode),
        #[cfg(feature = "ui")]
        Some(Command::Serve { addr }) => commands::serve(&addr),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("planroll v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("planroll v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'planroll --help' for usage");
                println!("Run 'planroll init' to get started");
            }
            Ok(())
        },
    }
}
