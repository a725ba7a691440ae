mod init;
pub use init::cmd_init;

use std::io::Read;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::config::Config;
use crate::model::task::{Priority, Task};
use crate::ops::reconcile::{EditedRow, reconcile};
use crate::ops::timeline::{Section, TimelineFilter, project};
use crate::ops::validate::{validate_dates, validate_name, validate_rows};
use crate::parse::{TaskRecord, parse_date, parse_done_token, parse_sheet};
use crate::store::{TaskStore, open_store};
use crate::util::unicode::fit_to_width;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: the project directory, its config, and an
/// open store.
pub struct ProjectContext {
    pub dir: PathBuf,
    pub config: Config,
    pub store: Box<dyn TaskStore>,
}

/// Discover the project (walking up from the working directory, or from the
/// `-C` override) and open its store.
pub fn load_context(project_dir: Option<&str>) -> Result<ProjectContext, Box<dyn std::error::Error>> {
    let start = match project_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let dir = config_io::discover_project(&start)?;
    let config = config_io::load_config(&dir)?;
    let store = open_store(&dir, &config.store);
    Ok(ProjectContext { dir, config, store })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    match cli.command {
        None => {
            // The bare invocation launches the TUI from main.rs
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before project discovery
            Commands::Init(args) => cmd_init(args, cli.project_dir.as_deref()),

            cmd => {
                let ctx = load_context(cli.project_dir.as_deref())?;
                match cmd {
                    Commands::Add(args) => cmd_add(&ctx, args, json),
                    Commands::List(args) => cmd_list(&ctx, args, json),
                    Commands::Done(args) => cmd_set_done(&ctx, args, true, json),
                    Commands::Undone(args) => cmd_set_done(&ctx, args, false, json),
                    Commands::Edit(args) => cmd_edit(&ctx, args),
                    Commands::Chart(args) => cmd_chart(&ctx, args, json),
                    Commands::Clear(args) => cmd_clear(&ctx, args),
                    Commands::Init(_) => unreachable!(),
                }
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_date_arg(s: &str, what: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    parse_date(s).ok_or_else(|| format!("invalid {what} '{s}' (expected YYYY-MM-DD)").into())
}

fn parse_priority_arg(s: &str) -> Result<Priority, Box<dyn std::error::Error>> {
    Priority::parse(s)
        .ok_or_else(|| format!("unknown priority '{s}' (expected critical, high, medium, low)").into())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &ProjectContext, args: AddArgs, json: bool) -> CmdResult {
    let deadline = parse_date_arg(&args.deadline, "deadline")?;
    let start = match args.start.as_deref() {
        Some(s) => parse_date_arg(s, "start date")?,
        // Deadline-only mode: start today
        None => today(),
    };
    validate_name(&args.name)?;
    validate_dates(start, deadline)?;

    let mut tasks = ctx.store.load()?;
    let task = Task::new(
        args.name.trim().to_string(),
        start,
        deadline,
        parse_priority_arg(&args.priority)?,
        args.notes.unwrap_or_default().trim().to_string(),
    );
    tasks.push(task.clone());
    ctx.store.save(&tasks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("added {} ({} → {})", task.id, task.start, task.plan_end);
    }
    Ok(())
}

fn cmd_list(ctx: &ProjectContext, args: ListArgs, json: bool) -> CmdResult {
    let priority_filter = args.priority.as_deref().map(parse_priority_arg).transpose()?;

    let tasks: Vec<Task> = ctx
        .store
        .load()?
        .into_iter()
        .filter(|t| !(args.active && t.done))
        .filter(|t| !(args.done && !t.done))
        .filter(|t| priority_filter.is_none_or(|p| t.priority == p))
        .collect();

    if json {
        let out = TaskListJson {
            tasks: tasks.iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for t in &tasks {
        let marker = if t.done { 'x' } else { ' ' };
        let mut line = format!(
            "[{}] {}  {} → {}  {:<8}  {}",
            marker, t.id, t.start, t.plan_end, t.priority, t.name
        );
        if let Some(d) = t.done_date {
            line.push_str(&format!("  (done {d})"));
        }
        println!("{line}");
    }
    Ok(())
}

/// Flip a task's done flag by routing the whole list through the
/// reconciler, so completion stamping follows the usual rules.
fn cmd_set_done(ctx: &ProjectContext, args: IdArgs, done: bool, json: bool) -> CmdResult {
    let tasks = ctx.store.load()?;
    let idx = tasks
        .iter()
        .position(|t| t.id == args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    let mut rows: Vec<EditedRow> = tasks.iter().map(EditedRow::from_task).collect();
    rows[idx].done = done;

    let updated = reconcile(&rows, &tasks, today());
    ctx.store.save(&updated)?;

    let task = &updated[idx];
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else if let Some(d) = task.done_date {
        println!("done {} (completed {})", task.id, d);
    } else {
        println!("undone {}", task.id);
    }
    Ok(())
}

fn cmd_edit(ctx: &ProjectContext, args: EditArgs) -> CmdResult {
    let text = match args.file.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {path}: {e}"))?,
    };

    let rows = parse_sheet(&text)
        .into_iter()
        .enumerate()
        .map(|(i, r)| row_from_record(i + 1, r))
        .collect::<Result<Vec<EditedRow>, _>>()?;

    // Any bad row rejects the whole batch before anything is written
    validate_rows(&rows)?;

    let prev = ctx.store.load()?;
    let updated = reconcile(&rows, &prev, today());
    ctx.store.save(&updated)?;
    println!("saved {} tasks", updated.len());
    Ok(())
}

/// Normalize one edited table row. Dates must parse (the reconciler assumes
/// normalized input); priority coerces to medium like the tabular backend.
fn row_from_record(row: usize, r: TaskRecord) -> Result<EditedRow, Box<dyn std::error::Error>> {
    let id = r.id.trim().to_string();
    if id.is_empty() {
        return Err(format!("row {row}: missing id").into());
    }
    let start =
        parse_date(&r.start).ok_or_else(|| format!("row {row}: invalid start '{}'", r.start))?;
    let plan_end = parse_date(&r.plan_end)
        .ok_or_else(|| format!("row {row}: invalid plan_end '{}'", r.plan_end))?;
    Ok(EditedRow {
        id,
        name: r.name.trim().to_string(),
        start,
        plan_end,
        priority: Priority::parse(&r.priority).unwrap_or_default(),
        notes: r.notes.trim().to_string(),
        done: parse_done_token(&r.done),
        done_date: parse_date(&r.done_date),
    })
}

fn cmd_chart(ctx: &ProjectContext, args: ChartArgs, json: bool) -> CmdResult {
    let priorities = if args.priority.is_empty() {
        Priority::ALL.into_iter().collect()
    } else {
        args.priority
            .iter()
            .map(|s| parse_priority_arg(s))
            .collect::<Result<_, _>>()?
    };
    let filter = TimelineFilter {
        show_done: !args.hide_done,
        priorities,
        name_contains: args.filter,
    };

    let tasks = ctx.store.load()?;
    let bars = project(&tasks, &filter);

    if json {
        let out = ChartJson {
            bars: bars.iter().map(bar_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if bars.is_empty() {
        println!("nothing to show");
        return Ok(());
    }

    const CHART_WIDTH: i64 = 48;
    let min_start = bars.iter().map(|b| b.start).min().unwrap_or_else(today);
    let max_end = bars
        .iter()
        .map(|b| b.end.max(b.start))
        .max()
        .unwrap_or_else(today);
    let total_days = (max_end - min_start).num_days() + 1;

    let mut section: Option<Section> = None;
    for bar in &bars {
        if section != Some(bar.section) {
            section = Some(bar.section);
            println!("{}:", bar.section.label());
        }
        let offset = ((bar.start - min_start).num_days() * CHART_WIDTH / total_days) as usize;
        let span = (bar.end - bar.start).num_days().max(0) + 1;
        let len = (((span * CHART_WIDTH) as u64).div_ceil(total_days as u64) as usize)
            .clamp(1, CHART_WIDTH as usize - offset);
        let mut track = " ".repeat(offset);
        track.push_str(&"█".repeat(len));
        track.push_str(&" ".repeat(CHART_WIDTH as usize - offset - len));
        println!(
            "  {}  |{}|  {} → {}  {}",
            fit_to_width(&bar.label, 24),
            track,
            bar.start,
            bar.end,
            bar.priority
        );
    }
    Ok(())
}

fn cmd_clear(ctx: &ProjectContext, args: ClearArgs) -> CmdResult {
    if !args.force {
        return Err("refusing to delete every task without --force".into());
    }
    ctx.store.save(&[])?;
    println!("cleared");
    Ok(())
}
