use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "set"];

const SET_USAGE: &str = "usage: config set <locale|currency_symbol|api_delay_ms|typing_delay_ms|simulate_failures|export_dir> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "show");
    match subcommand.as_str() {
        "show" => context.show_config(),
        "set" => {
            let Some((key, value)) = rest.split_first() else {
                return Err(CommandError::InvalidArguments(SET_USAGE.into()));
            };
            if value.is_empty() && *key != "export_dir" {
                return Err(CommandError::InvalidArguments(SET_USAGE.into()));
            }
            let value = value.join(" ");
            context.set_config_value(&key.to_ascii_lowercase(), value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; use show or set",
            other
        ))),
    }
}
