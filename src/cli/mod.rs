//! Non-interactive command line front end.

mod args;
mod commands;
pub mod output;

use std::{
    io::{self, IsTerminal, Write},
    path::Path,
};

use triplytics_config::{Config, ConfigManager};

use crate::errors::CliError;

pub use args::Invocation;

/// Runs the CLI against the process arguments, writing to stdout.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    configure_colors_for_terminal(stdout.is_terminal());
    run_with_args(&args, &mut out)
}

/// Runs one command line against `out`. Configuration is read from
/// `ConfigManager::default_base_dir()`.
pub fn run_with_args<S: AsRef<str>>(args: &[S], out: &mut dyn Write) -> Result<(), CliError> {
    let invocation = Invocation::parse(args)?;
    let manager = ConfigManager::with_base_dir(ConfigManager::default_base_dir())?;
    let config = manager.load()?;
    if !config.ui_color_enabled {
        colored::control::set_override(false);
    }
    let mut context = CliContext { manager, config };
    commands::dispatch(&mut context, &invocation, out)
}

fn configure_colors_for_terminal(is_terminal: bool) {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    colored::control::set_override(is_terminal && !no_color);
}

/// Loaded configuration plus the manager that persists it.
pub(crate) struct CliContext {
    manager: ConfigManager,
    pub(crate) config: Config,
}

impl CliContext {
    pub(crate) fn persist_config(&self) -> Result<(), CliError> {
        self.manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn config_path(&self) -> &Path {
        self.manager.config_path()
    }
}
