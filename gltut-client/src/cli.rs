//! Command line interface.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Runs one of the OpenGL lessons in a window. Press Escape to quit.
#[derive(Debug, Parser)]
#[command(name = "gltut", version)]
pub struct Cli {
    /// Lesson to run, see `--list`.
    #[arg(default_value = "hello-triangle")]
    pub lesson: String,

    /// Print every lesson and exit.
    #[arg(long)]
    pub list: bool,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Overrides the log level from the settings file.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,

    /// Write the effective settings back to the settings file before running.
    #[arg(long)]
    pub write_settings: bool,
}
