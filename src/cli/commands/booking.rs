use dialoguer::{Input, Select};

use crate::bookings::{
    Booking, BookingForm, BookingKind, BookingStatus, CalendarCursor, StatusFilter,
};
use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::formatting::{format_amount, format_long_date};

pub(crate) const SUBCOMMANDS: &[&str] = &["list", "search", "show", "create", "calendar"];

const CREATE_USAGE: &str =
    "usage: booking create <customer> <destination> <start YYYY-MM-DD> <end YYYY-MM-DD> <amount> [flight|hotel|package] [confirmed|pending|cancelled]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "booking",
        "List, search, create and calendar bookings",
        "booking [list [status] [query]|search <query>|show <id>|create ...|calendar [YYYY-MM|next|prev]]",
        cmd_booking,
    )]
}

fn cmd_booking(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "list");
    match subcommand.as_str() {
        "list" => {
            let filter = match rest.first() {
                Some(raw) => raw.parse::<StatusFilter>()?,
                None => StatusFilter::All,
            };
            let query = rest.get(1..).unwrap_or(&[]).join(" ");
            list(context, filter, &query);
            Ok(())
        }
        "search" => {
            list(context, StatusFilter::All, &rest.join(" "));
            Ok(())
        }
        "show" => {
            let id = rest
                .first()
                .ok_or_else(|| CommandError::InvalidArguments("usage: booking show <id>".into()))?;
            let booking = context
                .bookings
                .get(id)
                .ok_or_else(|| CommandError::Message(format!("No booking with id `{}`.", id)))?;
            show(context, booking);
            Ok(())
        }
        "create" => create(context, rest),
        "calendar" => calendar(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown booking action `{}`",
            other
        ))),
    }
}

fn row(context: &ShellContext, booking: &Booking) -> String {
    format!(
        "{:<6} {:<16} {:<12} {} to {:<13} {:<10} {:>12} {}",
        booking.id,
        booking.customer_name,
        booking.destination,
        format_long_date(booking.start_date),
        format_long_date(booking.end_date),
        booking.status.to_string(),
        format_amount(&context.config.currency_symbol, booking.amount),
        booking.kind
    )
}

fn list(context: &ShellContext, filter: StatusFilter, query: &str) {
    let matches = context.bookings.filtered(filter, query);
    output::section(format!("Bookings ({})", matches.len()));
    if matches.is_empty() {
        io::print_info("No bookings match.");
        return;
    }
    for booking in matches {
        output::detail(row(context, booking));
    }
}

fn show(context: &ShellContext, booking: &Booking) {
    output::section(format!("Booking {}", booking.id));
    output::detail(format!("Customer    : {}", booking.customer_name));
    output::detail(format!("Destination : {}", booking.destination));
    output::detail(format!(
        "Dates       : {} to {}",
        format_long_date(booking.start_date),
        format_long_date(booking.end_date)
    ));
    output::detail(format!("Status      : {}", booking.status));
    output::detail(format!("Type        : {}", booking.kind));
    output::detail(format!(
        "Amount      : {}",
        format_amount(&context.config.currency_symbol, booking.amount)
    ));
}

fn create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let form = if args.is_empty() && context.can_prompt() {
        prompt_form(context)?
    } else {
        form_from_args(args)?
    };
    let booking = context.bookings.create(&form)?;
    io::print_success(format!(
        "Booking {} created for {}.",
        booking.id, booking.customer_name
    ));
    Ok(())
}

fn form_from_args(args: &[&str]) -> Result<BookingForm, CommandError> {
    if args.len() < 5 {
        return Err(CommandError::InvalidArguments(CREATE_USAGE.into()));
    }
    let kind = match args.get(5) {
        Some(raw) => raw.parse::<BookingKind>()?,
        None => BookingKind::Hotel,
    };
    let status = match args.get(6) {
        Some(raw) => raw.parse::<BookingStatus>()?,
        None => BookingStatus::Confirmed,
    };
    Ok(BookingForm {
        customer_name: args[0].to_string(),
        destination: args[1].to_string(),
        start_date: args[2].to_string(),
        end_date: args[3].to_string(),
        status,
        amount: args[4].to_string(),
        kind,
    })
}

fn prompt_form(context: &ShellContext) -> Result<BookingForm, CommandError> {
    let mut form = BookingForm::blank(context.today());
    let theme = &context.theme;
    form.customer_name = Input::with_theme(theme)
        .with_prompt("Customer Name")
        .allow_empty(true)
        .interact_text()?;
    form.destination = Input::with_theme(theme)
        .with_prompt("Destination")
        .allow_empty(true)
        .interact_text()?;
    form.start_date = Input::with_theme(theme)
        .with_prompt("Start Date")
        .with_initial_text(form.start_date.clone())
        .interact_text()?;
    form.end_date = Input::with_theme(theme)
        .with_prompt("End Date")
        .with_initial_text(form.end_date.clone())
        .interact_text()?;
    form.amount = Input::with_theme(theme)
        .with_prompt("Amount")
        .allow_empty(true)
        .interact_text()?;

    let kinds = [
        BookingKind::Hotel,
        BookingKind::Flight,
        BookingKind::Package,
    ];
    let kind_labels: Vec<&str> = kinds.iter().map(|kind| kind.key()).collect();
    let kind = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kind_labels)
        .default(0)
        .interact()?;
    form.kind = kinds[kind];

    let status_labels: Vec<String> = BookingStatus::ALL.iter().map(|s| s.to_string()).collect();
    let status = Select::with_theme(theme)
        .with_prompt("Status")
        .items(&status_labels)
        .default(0)
        .interact()?;
    form.status = BookingStatus::ALL[status];
    Ok(form)
}

fn calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()) {
        None => {}
        Some(action) if action == "next" => context.calendar.next(),
        Some(action) if action == "prev" || action == "previous" => context.calendar.previous(),
        Some(month) => {
            context.calendar = parse_month(&month).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid month `{}` (use YYYY-MM, next or prev)",
                    month
                ))
            })?;
        }
    }

    let calendar = context.bookings.calendar(context.calendar);
    output::section(calendar.cursor.label());
    let mut busy = 0;
    for day in calendar.busy_days() {
        busy += 1;
        let names: Vec<String> = day
            .bookings
            .iter()
            .map(|booking| format!("{} ({})", booking.customer_name, booking.status))
            .collect();
        output::detail(format!(
            "{:>2}  {}",
            day.date.format("%-d"),
            names.join(", ")
        ));
    }
    if busy == 0 {
        io::print_info("No bookings start or end this month.");
    }
    Ok(())
}

fn parse_month(raw: &str) -> Option<CalendarCursor> {
    let (year, month) = raw.split_once('-')?;
    CalendarCursor::month(year.parse().ok()?, month.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arguments_parse() {
        assert_eq!(
            parse_month("2024-03").map(|c| c.label()).as_deref(),
            Some("March 2024")
        );
        assert!(parse_month("2024-13").is_none());
        assert!(parse_month("March").is_none());
    }

    #[test]
    fn create_arguments_default_type_and_status() {
        let args = ["Ann", "Paris", "2024-07-01", "2024-07-03", "999"];
        let form = form_from_args(&args).unwrap();
        assert_eq!(form.kind, BookingKind::Hotel);
        assert_eq!(form.status, BookingStatus::Confirmed);
        assert!(form_from_args(&["Ann", "Paris"]).is_err());
        let bad_kind = ["Ann", "Paris", "a", "b", "1", "boat"];
        assert!(form_from_args(&bad_kind).is_err());
    }
}
