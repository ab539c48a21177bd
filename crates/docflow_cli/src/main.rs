//! Inspection CLI for the workflow core.
//!
//! # Responsibility
//! - Seed a console with the demo collections and open a session for a role.
//! - Print role-scoped views as pretty JSON for quick local checks.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docflow_core::stats::processing_rate;
use docflow_core::{
    core_version, init_logging, seed_demo, Console, ConsoleConfig, DateRange, DepartmentFilter,
    Document, Role, SearchFilters, Task, TaskFilter, TaskStatus, ViewMode,
};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "docflow")]
#[command(about = "Inspect role-scoped document, task and notification views")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DOCFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Role for the session (admin, engineer, hr, finance); defaults to the configured role
    #[arg(short, long, env = "DOCFLOW_ROLE")]
    role: Option<Role>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List documents
    Documents {
        /// Show the unscoped collection (admin only)
        #[arg(long)]
        all: bool,
    },
    /// List tasks
    Tasks {
        /// Department name, or "all"
        #[arg(long, default_value = "all")]
        department: String,
        /// pending, in-progress, completed or overdue
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// List notifications
    Notifications {
        #[arg(long, default_value = "all")]
        view: ViewMode,
    },
    /// Search documents and tasks
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value = "all")]
        department: String,
        /// all, today, week, month or quarter
        #[arg(long, default_value = "all")]
        date_range: DateRange,
    },
    /// Aggregate counters for the session role
    Stats,
}

#[derive(Serialize)]
struct SearchReport {
    documents: Vec<Document>,
    tasks: Vec<Task>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConsoleConfig::default(),
    };
    init_logging(&config.logging).context("initializing logging")?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let console = Console::with_system_clock(&config);
    seed_demo(&console)?;
    let session = match cli.role {
        Some(role) => console.set_role(role)?,
        None => console.login_default()?,
    };
    info!(
        "event=cli_session module=cli status=ok role={}",
        session.role
    );

    let output = match cli.command {
        Command::Documents { all } => serde_json::to_string_pretty(&console.list_documents(!all)?)?,
        Command::Tasks { department, status } => {
            let filter = TaskFilter {
                department: DepartmentFilter::parse(&department),
                status,
            };
            serde_json::to_string_pretty(&console.list_tasks(&filter)?)?
        }
        Command::Notifications { view } => {
            serde_json::to_string_pretty(&console.list_notifications(view)?)?
        }
        Command::Search {
            query,
            department,
            date_range,
        } => {
            let filters = SearchFilters {
                department: DepartmentFilter::parse(&department),
                date_range,
            };
            serde_json::to_string_pretty(&SearchReport {
                documents: console.search_documents(&query, &filters)?,
                tasks: console.search_tasks(&query, &filters)?,
            })?
        }
        Command::Stats => {
            let documents = console.document_stats(true)?;
            serde_json::to_string_pretty(&serde_json::json!({
                "role": session.role,
                "documents": documents,
                "processing_rate": processing_rate(&documents),
                "tasks": console.task_stats(&TaskFilter::default())?,
                "notifications": console.notification_stats(ViewMode::All)?,
            }))?
        }
    };
    println!("{output}");

    console.logout()?;
    Ok(())
}
