//! Core CLI dispatch, error types and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    api::ApiError,
    assistant::Assistant,
    bookings::{BookingDesk, BookingFormErrors, CalendarCursor},
    config::ConfigManager,
    errors::DeskError,
    packages::{ItineraryViewer, PackageBuilder},
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Desk(#[from] DeskError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("booking not created: {0}")]
    Booking(BookingFormErrors),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<BookingFormErrors> for CommandError {
    fn from(errors: BookingFormErrors) -> Self {
        CommandError::Booking(errors)
    }
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Desk(#[from] DeskError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let mut config = config_manager.load()?;
        config.apply_env_overrides();

        if mode == CliMode::Script {
            colored::control::set_override(false);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let assistant = Assistant::from_config(&config);
        let calendar = CalendarCursor::containing(chrono::Local::now().date_naive());

        tracing::debug!(path = %config_manager.path().display(), ?mode, "shell context ready");

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            runtime,
            package: PackageBuilder::new(),
            itineraries: ItineraryViewer::new(),
            bookings: BookingDesk::new(),
            calendar,
            assistant,
            assistant_seen: 0,
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "trip-desk [step {}/{}]> ",
            self.package.cursor().index() + 1,
            self.package.cursor().step_count()
        )
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

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Booking(errors) => {
                self.print_error("Booking not created.");
                for (field, message) in errors.entries() {
                    output::detail(format!("{}: {}", field, message));
                }
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    pub(crate) fn require_prompt(&self, usage: &str) -> CommandResult {
        if self.can_prompt() {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!(
                "interactive prompts are unavailable in script mode; use `{}`",
                usage
            )))
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        for (key, value) in self.config.entries() {
            cli_io::print_info(format!("  {:<18} {}", key, value));
        }
        cli_io::print_info(format!(
            "  {:<18} {}",
            "file",
            self.config_manager.path().display()
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        self.config.set(key, value)?;
        self.persist_config()?;
        self.assistant.reconfigure(&self.config);
        cli_io::print_success(format!("Set {} to `{}`.", key, value));
        Ok(())
    }

    /// Prints assistant messages added since the last call.
    pub(crate) fn flush_assistant(&mut self) {
        let messages = self.assistant.messages();
        for message in messages.iter().skip(self.assistant_seen) {
            commands::assistant::print_message(message);
        }
        self.assistant_seen = messages.len();
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    lines: &[&str],
) -> Result<(tempfile::TempDir, ShellContext), CliError> {
    let home = tempfile::tempdir()?;
    let manager = ConfigManager::with_base_dir(home.path().to_path_buf())?;
    let mut config = manager.load()?;
    config.api_delay_ms = 0;
    config.typing_delay_ms = 0;
    manager.save(&config)?;

    let mut app = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        let outcome = app.process_line(line);
        match outcome {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok((home, app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::BuilderMode;

    #[test]
    fn package_commands_walk_the_wizard() {
        let (_home, app) = process_script(&[
            "package set trip_type leisure",
            "package next",
            "package set destination \"Goa, India\"",
            "package next",
            "package next",
            "package set budget comfort",
            "package next",
            "package next",
            "package next",
            "package submit",
        ])
        .unwrap();
        assert_eq!(app.package.mode(), BuilderMode::Summary);
        assert_eq!(app.package.cursor().index(), 6);
        assert_eq!(
            app.package.answers().destination.as_deref(),
            Some("Goa, India")
        );
    }

    #[test]
    fn early_submit_is_rejected() {
        let (_home, app) = process_script(&[
            "package set trip_type leisure",
            "package next",
            "package next",
            "package next",
            "package submit",
        ])
        .unwrap();
        assert_eq!(app.package.mode(), BuilderMode::Editing);
        assert_eq!(app.package.cursor().index(), 3);
        assert!(app.package.summary().is_none());
    }

    #[test]
    fn confirm_keeps_answers_and_rewinds() {
        let (_home, app) = process_script(&[
            "package set trip_type family",
            "package next",
            "package next",
            "package next",
            "package next",
            "package next",
            "package next",
            "package submit",
            "package confirm",
        ])
        .unwrap();
        assert_eq!(app.package.mode(), BuilderMode::Editing);
        assert_eq!(app.package.cursor().index(), 0);
        assert_eq!(app.package.answers().trip_type.as_deref(), Some("family"));
    }

    #[test]
    fn booking_create_appends_and_errors_leave_list_alone() {
        let (_home, app) = process_script(&[
            "booking create \"Priya Nair\" Goa 2024-05-01 2024-05-06 1500",
            "booking create \"\" Goa 2024-05-09 2024-05-06 abc",
        ])
        .unwrap();
        assert_eq!(app.bookings.bookings().len(), 4);
        assert_eq!(app.bookings.bookings()[3].id, "BK004");
    }

    #[test]
    fn itinerary_navigation_is_clamped() {
        let (_home, app) = process_script(&[
            "itinerary view india",
            "itinerary next",
            "itinerary next",
            "itinerary next",
        ])
        .unwrap();
        assert_eq!(app.itineraries.current_day_index(), 1);
    }

    #[test]
    fn assistant_commands_append_messages() {
        let (_home, app) = process_script(&[
            "assistant say any flights to Dubai?",
            "assistant option 1",
            "assistant search Dubai",
        ])
        .unwrap();
        let messages = app.assistant.messages();
        assert!(messages
            .last()
            .map(|m| m.content.starts_with("I found 1 hotels"))
            .unwrap_or(false));
        assert_eq!(app.assistant_seen, messages.len());
    }

    #[test]
    fn config_set_persists_and_reconfigures() {
        let (home, app) = process_script(&["config set simulate_failures true"]).unwrap();
        assert!(app.config.simulate_failures);
        let saved = std::fs::read_to_string(home.path().join("config.json")).unwrap();
        assert!(saved.contains("\"simulate_failures\": true"));
    }

    #[test]
    fn exit_stops_processing() {
        let (_home, app) = process_script(&["exit", "package set trip_type business"]).unwrap();
        assert!(app.package.answers().trip_type.is_none());
    }
}
