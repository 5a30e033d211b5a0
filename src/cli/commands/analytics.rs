use crate::analytics::{
    export, ExportOutcome, ReportFormat, METRICS, RECENT_ACTIVITY, REVENUE, TOP_DESTINATIONS,
};
use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "export"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "analytics",
        "Show dashboard figures or export the report",
        "analytics [show|export [txt|pdf]]",
        cmd_analytics,
    )]
}

fn cmd_analytics(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "show");
    match subcommand.as_str() {
        "show" => {
            show_dashboard();
            Ok(())
        }
        "export" => {
            let format = match rest.first() {
                Some(raw) => raw.parse::<ReportFormat>()?,
                None => ReportFormat::Txt,
            };
            export_report(context, format)
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown analytics action `{}`",
            other
        ))),
    }
}

fn show_dashboard() {
    output::section("Key Metrics");
    for metric in METRICS {
        output::detail(format!(
            "{:<18} {:>10}  {}",
            metric.name, metric.value, metric.change
        ));
    }

    output::section("Revenue Overview");
    let highest = REVENUE.iter().map(|point| point.value).max();
    let peak = highest.unwrap_or(1).max(1);
    for point in REVENUE {
        let bar = "#".repeat((point.value * 30 / peak) as usize);
        output::detail(format!("{} {:>7} {}", point.month, point.value, bar));
    }

    output::section("Top Destinations");
    for destination in TOP_DESTINATIONS {
        output::detail(format!(
            "{:<10} {:>4} bookings  ${}",
            destination.name, destination.bookings, destination.revenue
        ));
    }

    output::section("Recent Activity");
    for entry in RECENT_ACTIVITY {
        output::detail(format!("{:<30} {}", entry.action, entry.time));
    }
}

fn export_report(context: &ShellContext, format: ReportFormat) -> CommandResult {
    let dir = context.config_manager.export_dir(&context.config);
    match export(format, &dir, context.today(), &context.config.locale)? {
        ExportOutcome::Written(path) => {
            io::print_success(format!("Report saved to {}", path.display()));
        }
        ExportOutcome::Unsupported(notice) => io::print_warning(notice),
    }
    Ok(())
}
