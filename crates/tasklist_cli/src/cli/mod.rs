use clap::{Parser, Subcommand};
use tasklist_core::model::Task;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the persisted task list
    #[arg(long = "store-dir", value_name = "DIR", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasklist add "Buy milk"
    /// Example: tasklist add          (adds a placeholder task)
    Add {
        content: Option<String>,
    },
    /// Replace a task's content
    ///
    /// Example: tasklist edit 0 "Buy organic milk"
    Edit {
        id: u64,
        content: String,
    },
    /// Toggle a task's completion flag
    ///
    /// Example: tasklist done 0
    Done {
        id: u64,
    },
    /// Toggle a task's in-place edit flag
    ///
    /// Example: tasklist edit-mode 0
    EditMode {
        id: u64,
    },
    /// Remove a task
    ///
    /// Example: tasklist remove 0
    Remove {
        id: u64,
    },
    /// List tasks
    ///
    /// Example: tasklist list
    List,
    /// Print the current task count
    ///
    /// Example: tasklist count
    Count,
}

/// Actions the presentation layer offers for a task: no edit while
/// done, no done-toggle while editing, remove always.
pub fn available_actions(task: &Task) -> Vec<&'static str> {
    let mut actions = Vec::new();
    if !task.edit_mode {
        actions.push("done");
    }
    if !task.done {
        actions.push("edit");
    }
    actions.push("remove");
    actions
}
