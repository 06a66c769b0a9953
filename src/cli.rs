use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taskline")]
#[command(about = "A text-command personal task tracker", long_about = None)]
pub struct Cli {
    /// Where tasks are saved between sessions
    #[arg(
        long,
        env = "TASKLINE_DATA_FILE",
        default_value = "data/tasks.json",
        global = true
    )]
    pub data_file: PathBuf,

    /// Directory for the rolling log file
    #[arg(long, default_value = "logs", global = true)]
    pub log_dir: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start interactive mode
    Interactive,

    /// Run a single command line, e.g. `taskline exec deadline Report /by 2/12/2024 2359`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}
