//! Shared runtime state for shell interactions and command execution.

use std::io;

use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::errors::StorageError;
use crate::ledger::DailyLedger;
use crate::settings::SettingsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Errors that abort the shell itself rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors surfaced by a single command. The shell reports them and keeps
/// running; only `ExitRequested` ends the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: SettingsStore,
    pub day: DailyLedger,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let store = SettingsStore::open_default()?;
        Ok(Self::with_store(mode, store))
    }

    /// Builds a context around an already-opened store. The day starts
    /// empty, dated today, seeded from the stored roster and item list.
    pub(crate) fn with_store(mode: CliMode, store: SettingsStore) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let day = DailyLedger::for_settings(Local::now().date_naive(), store.config());
        Self {
            mode,
            registry,
            store,
            day,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }

    /// Folds newly stored roster names or side items into the current day.
    pub(crate) fn sync_day(&mut self) {
        self.day.sync_with(self.store.config());
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt_count(&self, prompt: &str, initial: u32) -> Result<u32, CommandError> {
        Input::<u32>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial.to_string())
            .interact_text()
            .map_err(CommandError::from)
    }

    pub(crate) fn prompt_amount(&self, prompt: &str, initial: f64) -> Result<f64, CommandError> {
        Input::<f64>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial.to_string())
            .validate_with(|value: &f64| -> Result<(), &str> {
                if *value < 0.0 {
                    Err("Amount must not be negative")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(CommandError::from)
    }

    pub(crate) fn select_distributor(&self, prompt: &str) -> Result<Option<String>, CommandError> {
        let names = self.store.config().distributors.clone();
        self.select_name(prompt, names, "No distributors on the roster.")
    }

    pub(crate) fn select_item(&self, prompt: &str) -> Result<Option<String>, CommandError> {
        let names: Vec<String> = self.store.config().other_prices.keys().cloned().collect();
        self.select_name(prompt, names, "No side items have prices yet.")
    }

    fn select_name(
        &self,
        prompt: &str,
        names: Vec<String>,
        empty_message: &str,
    ) -> Result<Option<String>, CommandError> {
        if names.is_empty() {
            output::warning(empty_message);
            return Ok(None);
        }
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&names)
            .default(0)
            .interact()?;
        Ok(names.into_iter().nth(index))
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        crate::cli::shell::handle_line(self, line)
    }
}

pub(crate) fn parse_count(raw: &str, field: &str) -> Result<u32, CommandError> {
    raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("{field} must be a non-negative whole number"))
    })
}

pub(crate) fn parse_amount(raw: &str, field: &str) -> Result<f64, CommandError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("{field} must be a non-negative number"))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}
