pub mod analytics;
pub mod assistant;
pub mod booking;
pub mod config;
pub mod itinerary;
pub mod package;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        package::definitions(),
        itinerary::definitions(),
        booking::definitions(),
        analytics::definitions(),
        assistant::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Second-word completions for each command.
pub(crate) fn subcommands(command: &str) -> &'static [&'static str] {
    match command {
        "package" => package::SUBCOMMANDS,
        "itinerary" => itinerary::SUBCOMMANDS,
        "booking" => booking::SUBCOMMANDS,
        "analytics" => analytics::SUBCOMMANDS,
        "assistant" => assistant::SUBCOMMANDS,
        "config" => config::SUBCOMMANDS,
        _ => &[],
    }
}

/// Splits `args` into a lower-cased subcommand and the remaining arguments.
pub(crate) fn split_subcommand<'a>(
    args: &'a [&'a str],
    default: &'a str,
) -> (String, &'a [&'a str]) {
    match args.split_first() {
        Some((first, rest)) => (first.to_ascii_lowercase(), rest),
        None => (default.to_string(), &[]),
    }
}
