use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("taskline v", env!("CARGO_PKG_VERSION"), " - your tasks on a timeline"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a taskline project in the current directory
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Mark a task done (stamps the completion date)
    Done(IdArgs),
    /// Mark a task not done (clears the completion date)
    Undone(IdArgs),
    /// Apply an edited task table (sheet format, file or stdin)
    Edit(EditArgs),
    /// Print the timeline
    Chart(ChartArgs),
    /// Delete every task
    Clear(ClearArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Store backend: json or sheet
    #[arg(long, default_value = "json")]
    pub backend: String,
    /// Store file name (default: tasks.json / tasks.sheet)
    #[arg(long)]
    pub file: Option<String>,
    /// Reinitialize even if taskline.toml already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Deadline (planned end), YYYY-MM-DD
    #[arg(long)]
    pub deadline: String,
    /// Start date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start: Option<String>,
    /// Priority: critical, high, medium, low
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only not-done tasks
    #[arg(long, conflicts_with = "done")]
    pub active: bool,
    /// Only done tasks
    #[arg(long)]
    pub done: bool,
    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Edited table file in sheet format; `-` or absent reads stdin
    pub file: Option<String>,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Hide the Done section
    #[arg(long)]
    pub hide_done: bool,
    /// Keep only these priorities (repeatable; default: all)
    #[arg(long)]
    pub priority: Vec<String>,
    /// Keep only tasks whose name contains this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Required: clearing is irreversible
    #[arg(long)]
    pub force: bool,
}
