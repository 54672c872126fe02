use std::error::Error;
use std::io::{self, BufRead, Write};

use chrono::{Local, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, default_config_path, load_config};
use crate::io::sqlite_store::SqliteStore;
use crate::io::store::TaskStore;
use crate::io::transfer;
use crate::model::{Config, DueFilter, MAX_PRIORITY, Query, SortKey, SortOrder, Task, TaskId};
use crate::parse::{parse_due, parse_due_filter, parse_tags};
use crate::tui;
use crate::util::logging::{self, LogTarget};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => match default_config_path() {
            Some(path) => load_config(&path)?,
            None => Config::default(),
        },
    };

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    let target = if interactive {
        LogTarget::Tui
    } else {
        LogTarget::Cli
    };
    logging::init(&config.log, target)?;

    let db_path = config_io::resolve_db_path(cli.db.as_deref(), &config)?;
    let mut store = SqliteStore::open(&db_path)
        .map_err(|e| format!("failed to initialize storage: {}", e))?;
    tracing::debug!(path = %db_path.display(), "opened database");

    let json = cli.json;
    match cli.command {
        None | Some(Commands::Tui) => tui::run(Box::new(store), &config),
        Some(Commands::Add(args)) => cmd_add(&mut store, args),
        Some(Commands::List(args)) => cmd_list(&store, args, json),
        Some(Commands::Show(args)) => cmd_show(&store, args, json),
        Some(Commands::Complete(args)) => cmd_complete(&mut store, args),
        Some(Commands::Reopen(args)) => cmd_reopen(&mut store, args),
        Some(Commands::Edit(args)) => cmd_edit(&mut store, args),
        Some(Commands::Delete(args)) => cmd_delete(&mut store, args),
        Some(Commands::Export(args)) => cmd_export(&store, args),
        Some(Commands::Import(args)) => cmd_import(&mut store, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(raw: &str) -> Result<TaskId, Box<dyn Error>> {
    raw.trim()
        .parse::<TaskId>()
        .map_err(|_| format!("invalid ID: {}", raw).into())
}

fn check_priority(priority: u8) -> CmdResult {
    if priority > MAX_PRIORITY {
        return Err("priority must be between 0 and 5 (1=highest, 5=lowest, 0=none)".into());
    }
    Ok(())
}

/// Build the listing query from `list` flags. Priority, due and title sorts
/// default to ascending; everything else newest first.
pub(crate) fn list_query(args: &ListArgs) -> Result<Query, Box<dyn Error>> {
    let mut query = Query::all();

    query.completed = if args.completed {
        Some(true)
    } else if args.all {
        None
    } else {
        Some(false)
    };

    if let Some(tags) = &args.filter_tag {
        query.tags = parse_tags(tags);
    }

    if args.overdue {
        query.due = Some(DueFilter::Overdue);
    } else if let Some(due) = &args.due {
        let filter = parse_due_filter(due, Local::now())
            .map_err(|e| format!("invalid due date filter: {}", e))?;
        query.due = Some(filter);
    }

    if let Some(raw) = &args.sort {
        let key = SortKey::parse(raw).ok_or_else(|| format!("unknown sort key: {}", raw))?;
        query.sort = key;
        query.order = match key {
            SortKey::Priority | SortKey::Due | SortKey::Title => SortOrder::Asc,
            SortKey::Created | SortKey::Updated => SortOrder::Desc,
        };
    }
    if let Some(raw) = &args.order {
        query.order = SortOrder::parse(raw).ok_or_else(|| format!("unknown sort order: {}", raw))?;
    }

    Ok(query)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &dyn TaskStore, args: ListArgs, json: bool) -> CmdResult {
    let query = list_query(&args)?;
    let tasks = store
        .list(&query)
        .map_err(|e| format!("failed to list todos: {}", e))?;

    if json {
        let out = TaskListJson {
            total: tasks.len(),
            tasks: &tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No todos found.");
        return Ok(());
    }
    print_lines(&format_task_table(&tasks, Local::now()));
    Ok(())
}

fn cmd_show(store: &dyn TaskStore, args: IdArgs, json: bool) -> CmdResult {
    let task = store.get(parse_id(&args.id)?)?;
    if json {
        let out = task_detail_json(&task, Local::now());
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_lines(&format_task_detail(&task, Local::now()));
    }
    Ok(())
}

fn cmd_export(store: &dyn TaskStore, args: FileArgs) -> CmdResult {
    let count = transfer::export_tasks(store, &args.file)?;
    println!("Exported {} todo(s) to {}", count, args.file.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut dyn TaskStore, args: AddArgs) -> CmdResult {
    check_priority(args.priority)?;
    let mut task = Task::new(args.title.trim());
    if task.title.is_empty() {
        return Err("title must not be empty".into());
    }
    task.description = args.description.unwrap_or_default();
    task.tags = args.tags.as_deref().map(parse_tags).unwrap_or_default();
    task.priority = args.priority;
    if let Some(due) = &args.due {
        task.due =
            Some(parse_due(due, Local::now()).map_err(|e| format!("invalid due date: {}", e))?);
    }

    let created = store
        .create(task)
        .map_err(|e| format!("failed to create todo: {}", e))?;
    println!("{}", action_line("Created", created.id, &created.title));
    Ok(())
}

fn cmd_complete(store: &mut dyn TaskStore, args: IdArgs) -> CmdResult {
    let id = parse_id(&args.id)?;
    let mut task = store.get(id)?;
    if task.completed {
        println!("Todo #{} is already completed.", id);
        return Ok(());
    }
    task.set_completed(true, Utc::now());
    let saved = store
        .update(task)
        .map_err(|e| format!("failed to complete todo: {}", e))?;
    println!("{}", action_line("Completed", saved.id, &saved.title));
    Ok(())
}

fn cmd_reopen(store: &mut dyn TaskStore, args: IdArgs) -> CmdResult {
    let id = parse_id(&args.id)?;
    let mut task = store.get(id)?;
    if !task.completed {
        println!("Todo #{} is not completed.", id);
        return Ok(());
    }
    task.set_completed(false, Utc::now());
    let saved = store
        .update(task)
        .map_err(|e| format!("failed to reopen todo: {}", e))?;
    println!("{}", action_line("Reopened", saved.id, &saved.title));
    Ok(())
}

fn cmd_edit(store: &mut dyn TaskStore, args: EditArgs) -> CmdResult {
    let id = parse_id(&args.id)?;
    let mut task = store.get(id)?;
    let mut modified = false;

    if let Some(title) = args.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        task.title = title.to_string();
        modified = true;
    }
    if let Some(description) = args.description {
        task.description = description;
        modified = true;
    }
    if let Some(tags) = &args.tags {
        task.tags = parse_tags(tags);
        modified = true;
    }
    if args.clear_tags {
        task.tags.clear();
        modified = true;
    }
    if let Some(due) = &args.due {
        task.due =
            Some(parse_due(due, Local::now()).map_err(|e| format!("invalid due date: {}", e))?);
        modified = true;
    }
    if args.clear_due {
        task.due = None;
        modified = true;
    }
    if let Some(priority) = args.priority {
        check_priority(priority)?;
        task.priority = priority;
        modified = true;
    }

    if !modified {
        println!(
            "No changes specified. Use --title, --tags, --due, --priority, --desc, --clear-due, or --clear-tags."
        );
        return Ok(());
    }

    let saved = store
        .update(task)
        .map_err(|e| format!("failed to update todo: {}", e))?;
    println!("{}", action_line("Updated", saved.id, &saved.title));
    Ok(())
}

fn cmd_delete(store: &mut dyn TaskStore, args: DeleteArgs) -> CmdResult {
    let id = parse_id(&args.id)?;
    let task = store.get(id)?;

    if !args.yes {
        print!("Delete todo #{}: {}? [y/N] ", task.id, task.title);
        io::stdout().flush()?;
        let mut response = String::new();
        io::stdin()
            .lock()
            .read_line(&mut response)
            .map_err(|e| format!("failed to read response: {}", e))?;
        let response = response.trim().to_lowercase();
        if response != "y" && response != "yes" {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .delete(id)
        .map_err(|e| format!("failed to delete todo: {}", e))?;
    println!("{}", action_line("Deleted", task.id, &task.title));
    Ok(())
}

fn cmd_import(store: &mut dyn TaskStore, args: FileArgs) -> CmdResult {
    let report = transfer::import_tasks(store, &args.file)?;
    for (title, err) in &report.failed {
        println!("Warning: failed to import todo '{}': {}", title, err);
    }
    println!(
        "Imported {} todo(s) from {}",
        report.imported.len(),
        args.file.display()
    );
    Ok(())
}
