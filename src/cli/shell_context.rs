use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use tokio::runtime::Runtime;

use crate::{
    assistant::Assistant,
    bookings::{BookingDesk, CalendarCursor},
    config::{Config, ConfigManager},
    packages::{ItineraryViewer, PackageBuilder},
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything one shell session owns.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    /// Drives the mock API calls; the shell blocks on each one.
    pub runtime: Runtime,
    pub package: PackageBuilder,
    pub itineraries: ItineraryViewer,
    pub bookings: BookingDesk,
    pub calendar: CalendarCursor,
    pub assistant: Assistant,
    /// Number of assistant messages already printed.
    pub assistant_seen: usize,
    pub running: bool,
}

impl ShellContext {
    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
