use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::packages::itinerary::image_url;
use crate::packages::catalog;

pub(crate) const SUBCOMMANDS: &[&str] = &["list", "view", "next", "prev", "close"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "itinerary",
        "Browse the preset itineraries day by day",
        "itinerary [list|view <id>|next|prev|close]",
        cmd_itinerary,
    )]
}

fn cmd_itinerary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "list");
    match subcommand.as_str() {
        "list" => {
            list_catalog();
            Ok(())
        }
        "view" | "open" => {
            let id = rest.first().ok_or_else(|| {
                CommandError::InvalidArguments("usage: itinerary view <id>".into())
            })?;
            let itinerary = context.itineraries.select(id)?;
            output::section(itinerary.title);
            io::print_info(format!(
                "{} | {} | {}",
                itinerary.description, itinerary.duration, itinerary.price
            ));
            show_day(context);
            Ok(())
        }
        "next" => step(context, true),
        "prev" | "previous" => step(context, false),
        "close" => {
            context.itineraries.close();
            io::print_info("Back to the itinerary catalog.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown itinerary action `{}`",
            other
        ))),
    }
}

fn list_catalog() {
    output::section("Preset itineraries");
    for itinerary in catalog() {
        output::detail(format!(
            "{:<10} {:<20} {:<8} {}",
            itinerary.id, itinerary.title, itinerary.duration, itinerary.price
        ));
    }
    io::print_hint("Open one with `itinerary view <id>`.");
}

fn step(context: &mut ShellContext, forward: bool) -> CommandResult {
    if context.itineraries.active().is_none() {
        return Err(CommandError::InvalidArguments(
            "no itinerary open; use `itinerary view <id>` first".into(),
        ));
    }
    if forward {
        context.itineraries.next_day();
    } else {
        context.itineraries.previous_day();
    }
    show_day(context);
    Ok(())
}

fn show_day(context: &ShellContext) {
    let (Some(itinerary), Some(day)) = (
        context.itineraries.active(),
        context.itineraries.current_day(),
    ) else {
        return;
    };
    output::section(format!(
        "Day {} of {}: {}",
        day.day,
        itinerary.days.len(),
        day.title
    ));
    io::print_info(day.description);
    for activity in day.activities {
        output::detail(format!("{:<10} {}", activity.time, activity.description));
        if let Some(image) = activity.image {
            output::detail(format!("{:<10} {}", "", image_url(image)));
        }
    }
    if context.itineraries.has_previous() {
        io::print_hint("Previous day: `itinerary prev`.");
    }
    if context.itineraries.has_next() {
        io::print_hint("Next day: `itinerary next`.");
    }
}
