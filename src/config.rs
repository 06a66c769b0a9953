use crate::cli::Cli;
use crate::command::DateTimeFormat;
use std::path::PathBuf;

/// Runtime settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub colored: bool,
    pub format: DateTimeFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/tasks.json"),
            log_dir: PathBuf::from("logs"),
            colored: true,
            format: DateTimeFormat::default(),
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            data_file: cli.data_file.clone(),
            log_dir: cli.log_dir.clone(),
            colored: !cli.no_color,
            ..Self::default()
        }
    }
}
