use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tasklist_cli::cli::{Cli, Command, available_actions};
use tasklist_core::config::{Config, load_config_with_fallback};
use tasklist_core::error::StoreError;
use tasklist_core::logging::{default_log_level, init_logging};
use tasklist_core::model::Task;
use tasklist_core::storage::{FileStore, STORE_DIR_ENV_VAR, default_store_dir};
use tasklist_core::store::TaskListStore;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "content")]
    content: String,
    #[tabled(rename = "state")]
    state: &'static str,
    #[tabled(rename = "actions")]
    actions: String,
}

fn state_label(task: &Task) -> &'static str {
    if task.edit_mode {
        "editing"
    } else if task.done {
        "done"
    } else {
        "open"
    }
}

fn print_tasks_plain(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks to do yet.");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id,
            content: task.content.clone(),
            state: state_label(task),
            actions: available_actions(task).join(" "),
        })
        .collect();

    println!("{}", Table::new(rows));
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), StoreError> {
    let payload =
        serde_json::to_string(tasks).map_err(|err| StoreError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), StoreError> {
    let payload =
        serde_json::to_string(task).map_err(|err| StoreError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn resolve_store_dir(cli: &Cli, config: &Config) -> Result<PathBuf, StoreError> {
    if let Some(dir) = cli.store_dir.as_deref() {
        return Ok(PathBuf::from(dir));
    }

    if let Ok(dir) = std::env::var(STORE_DIR_ENV_VAR)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    if let Some(dir) = config.store_dir.as_deref() {
        return Ok(PathBuf::from(dir));
    }

    default_store_dir()
}

fn open_store(cli: &Cli, config: &Config) -> Result<TaskListStore, StoreError> {
    let dir = resolve_store_dir(cli, config)?;
    Ok(TaskListStore::open(Box::new(FileStore::new(dir))))
}

fn missing_task(id: u64) -> StoreError {
    StoreError::invalid_input(format!("no such task: {id}"))
}

fn run_command(cli: Cli, config: &Config) -> Result<(), StoreError> {
    let mut store = open_store(&cli, config)?;

    match cli.command {
        Command::Add { content } => {
            let task = store.add(content.as_deref().unwrap_or(""));
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} ({})", task.content, task.id);
            }
        }
        Command::Edit { id, content } => {
            let task = store.set_content(id, &content).ok_or_else(|| missing_task(id))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated task: {} ({})", task.content, task.id);
            }
        }
        Command::Done { id } => {
            let task = store.toggle_done(id).ok_or_else(|| missing_task(id))?;
            if cli.json {
                print_task_json(&task)?;
            } else if task.done {
                println!("Marked done: {} ({})", task.content, task.id);
            } else {
                println!("Marked not done: {} ({})", task.content, task.id);
            }
        }
        Command::EditMode { id } => {
            let task = store.toggle_edit_mode(id).ok_or_else(|| missing_task(id))?;
            if cli.json {
                print_task_json(&task)?;
            } else if task.edit_mode {
                println!("Editing task: {} ({})", task.content, task.id);
            } else {
                println!("Stopped editing task: {} ({})", task.content, task.id);
            }
        }
        Command::Remove { id } => {
            let task = store.remove(id).ok_or_else(|| missing_task(id))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Removed task: {} ({})", task.content, task.id);
            }
        }
        Command::List => {
            if cli.json {
                print_tasks_json(store.tasks())?;
            } else {
                print_tasks_plain(store.tasks());
            }
        }
        Command::Count => {
            if cli.json {
                println!("{}", serde_json::json!({ "count": store.count() }));
            } else {
                println!("Current tasks: {}", store.count());
            }
        }
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> StoreError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    StoreError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, StoreError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(StoreError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive(config: &Config) -> Result<(), StoreError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| StoreError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, config) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let config_load = load_config_with_fallback();
    let config = config_load.config;

    let level = config
        .log_level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    if let Err(err) = init_logging(level) {
        eprintln!("WARN: {err}");
    }
    if let Some(err) = config_load.error {
        log::warn!("event=config_fallback error={err}");
    }

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive(&config) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli, &config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
