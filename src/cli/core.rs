//! Core CLI dispatch, rendering and shell context helpers.

use std::{env, io, sync::Arc};

use strsim::levenshtein;

use crate::config::ConfigManager;
use crate::core::services::InMemoryBook;
use crate::core::{BalanceController, SystemClock};
use crate::errors::{CliError, CollaboratorError, ConfigError, RevenueParseError, ViewError};
use crate::view::SnapshotChange;

use super::commands::{self, CommandRegistry};
use super::output::{self, OutputPreferences};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script || env::var_os("NO_COLOR").is_some(),
            quiet: mode == CliMode::Script,
        });

        let config = config_manager.load()?;
        let book_path = config.book_path_in(config_manager.base_dir());
        let book = if book_path.exists() {
            InMemoryBook::load_from_path(&book_path)?
        } else {
            InMemoryBook::new()
        };

        let mut controller = BalanceController::with_config(book, Arc::new(SystemClock), &config);
        if let Err(err) = controller.initialize_view() {
            output::warning(format!("Could not load the book: {err}"));
        }
        let last_snapshot = controller.view().snapshot();

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            controller,
            config_manager,
            config,
            book_path,
            last_snapshot,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let view = self.controller.view();
        match (view.selected_year(), view.selected_client()) {
            (Some(year), Some(client)) => format!("balance {year}/{client}> "),
            (Some(year), None) => format!("balance {year}> "),
            _ => "balance> ".to_string(),
        }
    }

    /// Dismisses the previous command's error messages and remembers the
    /// state the next rendering is compared against.
    pub(crate) fn begin_command(&mut self) {
        self.controller.view_mut().clear_errors();
        self.last_snapshot = self.controller.view().snapshot();
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

    /// Prints the error messages and revenue label that changed since
    /// [`ShellContext::begin_command`].
    pub(crate) fn render_changes(&mut self) {
        let snapshot = self.controller.view().snapshot();
        let changes = snapshot.changes_since(&self.last_snapshot);
        if changes.contains(&SnapshotChange::Errors) {
            for message in [&snapshot.client_error, &snapshot.invoice_error]
                .into_iter()
                .flatten()
            {
                output::error(message);
            }
        }
        if changes.contains(&SnapshotChange::Revenue) && !snapshot.revenue_label.is_empty() {
            output::revenue(self.decorate_label(&snapshot.revenue_label));
        }
        self.last_snapshot = snapshot;
    }

    /// Appends the configured currency symbol to totals.
    pub(crate) fn decorate_label(&self, label: &str) -> String {
        let symbol = self.config.currency_symbol.trim();
        if symbol.is_empty() || !label.starts_with("total") {
            label.to_string()
        } else {
            format!("{label} {symbol}")
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(&err);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.begin_command();
        let outcome = self.dispatch(&command, &tokens[0], &args);
        self.render_changes();
        outcome
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

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            // Already rendered from the view's error messages.
            CommandError::View(ViewError::Collaborator(_) | ViewError::InvalidDate(_))
                if self.has_visible_error() =>
            {
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }

    fn has_visible_error(&self) -> bool {
        let view = self.controller.view();
        view.client_error().is_some() || view.invoice_error().is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Service(#[from] CollaboratorError),
    #[error(transparent)]
    Amount(#[from] RevenueParseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, config_manager)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
