use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "todo",
    about = "A command-line TODO application with tags, due dates and priorities",
    long_about = "A command-line TODO application with both CLI and interactive TUI modes.\n\
                  Run without a subcommand (or with `tui`) for the interactive interface.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON (list, show)
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new todo
    Add(AddArgs),
    /// List todos (pending by default)
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Show todo details
    Show(IdArgs),
    /// Mark a todo as complete
    #[command(visible_alias = "done")]
    Complete(IdArgs),
    /// Reopen a completed todo
    #[command(visible_alias = "undo")]
    Reopen(IdArgs),
    /// Edit a todo's fields
    Edit(EditArgs),
    /// Delete a todo
    #[command(visible_aliases = ["rm", "remove"])]
    Delete(DeleteArgs),
    /// Export all todos to a JSON file
    Export(FileArgs),
    /// Import todos from a JSON file (each record is created anew)
    Import(FileArgs),
    /// Launch the interactive terminal UI
    Tui,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Title of the new todo
    pub title: String,
    /// Tags, e.g. "#work #urgent"
    #[arg(short, long)]
    pub tags: Option<String>,
    /// Due date, e.g. 2026-02-14, today, tomorrow, next-week
    #[arg(short, long)]
    pub due: Option<String>,
    /// Priority (1=highest, 5=lowest, 0=none)
    #[arg(short, long, default_value_t = 0)]
    pub priority: u8,
    /// Description
    #[arg(long = "desc")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New tags (replaces existing)
    #[arg(short, long)]
    pub tags: Option<String>,
    /// New due date
    #[arg(short, long)]
    pub due: Option<String>,
    /// New priority (1-5, 0=none)
    #[arg(short, long)]
    pub priority: Option<u8>,
    /// New description
    #[arg(long = "desc")]
    pub description: Option<String>,
    /// Clear the due date
    #[arg(long)]
    pub clear_due: bool,
    /// Clear all tags
    #[arg(long)]
    pub clear_tags: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Todo ID
    pub id: String,
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Show all todos
    #[arg(long, conflicts_with_all = ["completed", "pending"])]
    pub all: bool,
    /// Show completed todos only
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,
    /// Show pending todos only (default)
    #[arg(long)]
    pub pending: bool,
    /// Filter by tag, e.g. "#work" (several tags must all match)
    #[arg(long)]
    pub filter_tag: Option<String>,
    /// Filter by due date: today, tomorrow, next-week, or a date
    #[arg(long)]
    pub due: Option<String>,
    /// Show overdue todos
    #[arg(long, conflicts_with = "due")]
    pub overdue: bool,
    /// Sort by: priority, due, created, updated, title
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort order: asc, desc
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: String,
}

#[derive(Args)]
pub struct FileArgs {
    /// JSON file path
    pub file: PathBuf,
}
