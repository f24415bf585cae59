//! CLI entry point over the CRM core.
//!
//! # Responsibility
//! - Wire config + logging + a demo store and print core projections.
//! - Exercise the text generator end to end without a UI.

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use crm_core::store::seed::demo_store;
use crm_core::views::calendar::tasks_due_on;
use crm_core::views::dashboard::dashboard_summary;
use crm_core::views::notes::notes_feed;
use crm_core::views::tasks::task_row;
use crm_core::{
    describe_task, init_logging_from_config, ContactId, CrmConfig, CrmStore, GeminiGenerator,
    GenerationError, GENERATION_FAILED_MESSAGE,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "crm", version, about = "In-memory CRM dashboard core")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true, env = "CRM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Headline numbers and recent tasks.
    Summary,
    /// Task table, optionally limited to one due day (UTC).
    Tasks {
        #[arg(long)]
        day: Option<NaiveDate>,
    },
    /// Notes newest first.
    Notes {
        #[arg(long)]
        contact: Option<ContactId>,
    },
    /// Demo data as JSON.
    Export,
    /// Draft a task description for a title.
    Describe { title: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CrmConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = match demo_store() {
        Ok(store) => store.with_avatar_url_template(config.avatar_url_template.clone()),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Summary => print_summary(&store),
        Command::Tasks { day } => print_tasks(&store, day),
        Command::Notes { contact } => print_notes(&store, contact),
        Command::Export => match serde_json::to_string_pretty(&store.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        Command::Describe { title } => return describe(&config, &title).await,
    }
    ExitCode::SUCCESS
}

fn print_summary(store: &CrmStore) {
    let summary = dashboard_summary(store);
    println!("contacts={}", summary.total_contacts);
    println!("tasks={}", summary.total_tasks);
    println!("pending={}", summary.pending_tasks);
    println!("completed={}", summary.completed_tasks);
    println!("recent:");
    for row in &summary.recent_tasks {
        println!(
            "  {}  {:<32} {:<16} {}",
            row.task.due_date.format("%Y-%m-%d"),
            row.task.title,
            row.assignee_name(),
            row.task.status
        );
    }
}

fn print_tasks(store: &CrmStore, day: Option<NaiveDate>) {
    let tasks = match day {
        Some(day) => tasks_due_on(store, day, &Utc),
        None => store.tasks().iter().collect(),
    };
    for task in tasks {
        let row = task_row(store, task);
        println!(
            "{}  {}  {:<32} {:<16} {:<12} {}",
            task.id,
            task.due_date.format("%Y-%m-%d"),
            task.title,
            row.assignee_name(),
            task.status,
            row.contact_name.unwrap_or("-")
        );
    }
}

fn print_notes(store: &CrmStore, contact: Option<ContactId>) {
    for row in notes_feed(store, contact) {
        println!(
            "{}  [{}] {}",
            row.note.created_at.format("%Y-%m-%d %H:%M"),
            row.contact_name.unwrap_or("-"),
            row.note.content
        );
    }
}

async fn describe(config: &CrmConfig, title: &str) -> ExitCode {
    let generator = match GeminiGenerator::from_config(&config.generator) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match describe_task(&generator, title).await {
        Ok(description) => {
            println!("{description}");
            ExitCode::SUCCESS
        }
        Err(err @ GenerationError::EmptyTitle) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::warn!("event=cli_describe module=cli status=error error_code={}", err.code());
            eprintln!("{GENERATION_FAILED_MESSAGE} ({err})");
            ExitCode::FAILURE
        }
    }
}
