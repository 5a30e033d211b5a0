use colored::Colorize;
use dialoguer::Input;

use crate::api::HotelSearchParams;
use crate::assistant::{Message, Sender};
use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "say", "option", "hotels", "suggest", "search"];

const SEARCH_USAGE: &str = "assistant search <location> [check-in] [check-out] [guests]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "assistant",
        "Chat with the travel assistant",
        "assistant [show|say <text>|option <n>|hotels|suggest|search <location> [check-in] [check-out] [guests]]",
        cmd_assistant,
    )]
}

fn cmd_assistant(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "show");
    match subcommand.as_str() {
        "show" => {
            output::section("AI Travel Assistant");
            context.assistant_seen = 0;
        }
        "say" => {
            let text = rest.join(" ");
            if text.trim().is_empty() {
                return Err(CommandError::InvalidArguments(
                    "usage: assistant say <text>".into(),
                ));
            }
            context.runtime.block_on(context.assistant.send(&text));
        }
        "option" | "choose" => {
            let raw = rest.join(" ");
            let options = context.assistant.latest_options();
            let chosen = raw
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| options.get(index))
                .or_else(|| {
                    options
                        .iter()
                        .find(|option| option.label().eq_ignore_ascii_case(raw.trim()))
                })
                .copied()
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "no option `{}`; pick a number from the last assistant message",
                        raw
                    ))
                })?;
            context.runtime.block_on(context.assistant.choose(chosen));
        }
        "hotels" | "find" => {
            context
                .runtime
                .block_on(context.assistant.open_hotel_search());
        }
        "suggest" => {
            context
                .runtime
                .block_on(context.assistant.suggest_destinations());
        }
        "search" => {
            if context.assistant.pending_form().is_none() {
                return Err(CommandError::InvalidArguments(
                    "no hotel search form is open; use `assistant hotels` first".into(),
                ));
            }
            let params = if rest.is_empty() && context.can_prompt() {
                prompt_search(context)?
            } else {
                search_from_args(rest)?
            };
            context
                .runtime
                .block_on(context.assistant.submit_hotel_search(&params));
        }
        other => {
            let message = format!("unknown assistant action `{}`", other);
            return Err(CommandError::InvalidArguments(message));
        }
    }
    context.flush_assistant();
    Ok(())
}

fn search_from_args(args: &[&str]) -> Result<HotelSearchParams, CommandError> {
    let Some(location) = args.first() else {
        let usage = format!("usage: {}", SEARCH_USAGE);
        return Err(CommandError::InvalidArguments(usage));
    };
    let guests = match args.get(3) {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!("guests must be a whole number, got `{}`", raw))
        })?,
        None => 1,
    };
    Ok(HotelSearchParams {
        location: location.to_string(),
        check_in: args.get(1).map(ToString::to_string).unwrap_or_default(),
        check_out: args.get(2).map(ToString::to_string).unwrap_or_default(),
        guests,
    })
}

fn prompt_search(context: &ShellContext) -> Result<HotelSearchParams, CommandError> {
    let theme = &context.theme;
    let location: String = Input::with_theme(theme)
        .with_prompt("Location")
        .interact_text()?;
    let check_in: String = Input::with_theme(theme)
        .with_prompt("Check-in (YYYY-MM-DD)")
        .allow_empty(true)
        .interact_text()?;
    let check_out: String = Input::with_theme(theme)
        .with_prompt("Check-out (YYYY-MM-DD)")
        .allow_empty(true)
        .interact_text()?;
    let guests: u32 = Input::with_theme(theme)
        .with_prompt("Guests")
        .default(1)
        .interact_text()?;
    Ok(HotelSearchParams {
        location,
        check_in,
        check_out,
        guests,
    })
}

/// Prints one transcript entry with its option buttons.
pub(crate) fn print_message(message: &Message) {
    match message.sender {
        Sender::User => println!("{} {}", "You:".bold(), message.content),
        Sender::Bot => println!("{} {}", "Assistant:".bright_blue().bold(), message.content),
    }
    if !message.options.is_empty() {
        let buttons: Vec<String> = message
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| format!("[{}] {}", index + 1, option.label()))
            .collect();
        output::detail(buttons.join("  "));
    }
    if let Some(form) = &message.form {
        output::detail(format!(
            "Hotel search: location, check-in, check-out, guests (default {}).",
            form.guests
        ));
        io::print_hint(format!("Fill it in with `{}`.", SEARCH_USAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_arguments_default_to_one_guest() {
        let params = search_from_args(&["Dubai"]).unwrap();
        assert_eq!(params.location, "Dubai");
        assert_eq!(params.guests, 1);
        let args = ["Male", "2024-03-01", "2024-03-05", "3"];
        let params = search_from_args(&args).unwrap();
        assert_eq!(params.guests, 3);
        assert!(search_from_args(&["Male", "", "", "many"]).is_err());
        assert!(search_from_args(&[]).is_err());
    }
}
