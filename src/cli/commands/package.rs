//! `package` command: drives the custom package builder.

use crate::cli::commands::split_subcommand;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{
    field_help, progress_bar, summary_lines, DialoguerInteraction, FormResult, PackageWizard,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::packages::{
    BuilderMode, FieldKey, FieldUpdate, PackageSummary, StepAction, NOT_SPECIFIED, STEPS,
};

pub(crate) const SUBCOMMANDS: &[&str] = &[
    "show", "set", "next", "back", "submit", "edit", "confirm", "reset", "options", "steps",
    "wizard",
];

const SUBMIT_EARLY: &str =
    "submit is only available on the last step; use `package next` to get there";
const CONFIRM_HINT: &str = "`package confirm` books it, `package edit` returns to the form.";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "package",
        "Build a custom travel package step by step",
        "package [show|set <field> <value>|next|back|submit|edit|confirm|reset|options [field]|steps|wizard]",
        cmd_package,
    )]
}

fn cmd_package(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, "show");
    match subcommand.as_str() {
        "show" => {
            show_current(context);
            Ok(())
        }
        "set" => set_field(context, rest),
        "next" => {
            ensure_editing(context)?;
            if context.package.cursor().primary_action() == StepAction::Submit {
                io::print_info("This is the last step. Use `package submit` to review.");
            }
            context.package.advance();
            show_step(context);
            Ok(())
        }
        "back" | "previous" => {
            ensure_editing(context)?;
            context.package.retreat();
            show_step(context);
            Ok(())
        }
        "submit" => {
            let cursor = context.package.cursor();
            if context.package.mode() == BuilderMode::Editing && !cursor.is_last() {
                return Err(CommandError::InvalidArguments(SUBMIT_EARLY.into()));
            }
            let summary = context.package.submit()?;
            print_summary(&summary, &context.config.locale);
            io::print_hint(CONFIRM_HINT);
            Ok(())
        }
        "edit" => {
            context.package.back_to_form();
            show_step(context);
            Ok(())
        }
        "confirm" => {
            if context.package.mode() != BuilderMode::Summary {
                return Err(CommandError::InvalidArguments(
                    "submit the package before confirming it".into(),
                ));
            }
            let summary = context.package.confirm();
            io::print_success(format!(
                "Package booked: {} trip to {}.",
                summary.trip_type, summary.destination
            ));
            Ok(())
        }
        "reset" => {
            context.package.reset();
            io::print_success("Package builder cleared.");
            Ok(())
        }
        "options" => show_options(rest),
        "steps" => {
            list_steps(context);
            Ok(())
        }
        "wizard" => run_wizard(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown package action `{}`",
            other
        ))),
    }
}

fn ensure_editing(context: &ShellContext) -> CommandResult {
    if context.package.mode() == BuilderMode::Summary {
        return Err(CommandError::InvalidArguments(
            "the summary is showing; use `package edit` to change answers".into(),
        ));
    }
    Ok(())
}

fn set_field(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_editing(context)?;
    let Some((key, value)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: package set <field> <value>".into(),
        ));
    };
    let field = FieldKey::from_key(key).ok_or_else(|| {
        let known: Vec<&str> = FieldKey::ALL.iter().map(|field| field.key()).collect();
        CommandError::InvalidArguments(format!(
            "unknown field `{}`; expected one of {}",
            key,
            known.join(", ")
        ))
    })?;
    let raw = value.join(" ");
    context.package.set_field(FieldUpdate::parse(field, &raw)?);

    let shown = context
        .package
        .answers()
        .raw_value(field)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    io::print_success(format!("{} set to {}.", field.label(), shown));
    Ok(())
}

fn show_current(context: &ShellContext) {
    match context.package.summary() {
        Some(summary) => print_summary(&summary, &context.config.locale),
        None => show_step(context),
    }
}

fn show_step(context: &ShellContext) {
    let cursor = context.package.cursor();
    let step = context.package.current_step();
    output::section(format!(
        "Step {} / {}: {}",
        cursor.index() + 1,
        cursor.step_count(),
        step.title
    ));
    io::print_info(step.description);
    output::detail(progress_bar(cursor.progress_percent()));
    for field in step.fields {
        let value = context
            .package
            .answers()
            .raw_value(*field)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        output::detail(format!(
            "{:<20} {:<18} {}",
            field.label(),
            field.key(),
            value
        ));
    }
    match cursor.primary_action() {
        StepAction::Next => io::print_hint("Continue with `package next`."),
        StepAction::Submit => io::print_hint("Review with `package submit`."),
    }
    if !cursor.is_first() {
        io::print_hint("Go back with `package back`.");
    }
}

fn print_summary(summary: &PackageSummary, locale: &str) {
    output::section("Package Summary");
    for line in summary_lines(summary, locale) {
        output::detail(line);
    }
}

fn show_options(args: &[&str]) -> CommandResult {
    let fields: Vec<FieldKey> = match args.first() {
        Some(key) => {
            let field = FieldKey::from_key(key).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown field `{}`", key))
            })?;
            vec![field]
        }
        None => FieldKey::ALL.to_vec(),
    };
    output::section("Package fields");
    for field in fields {
        output::detail(format!("{:<18} {}", field.key(), field_help(field)));
    }
    Ok(())
}

fn list_steps(context: &ShellContext) {
    output::section("Steps");
    let current = context.package.cursor().index();
    for (index, step) in STEPS.iter().enumerate() {
        let marker = if index == current { ">" } else { " " };
        output::detail(format!("{} {}. {}", marker, index + 1, step.title));
    }
}

fn run_wizard(context: &mut ShellContext) -> CommandResult {
    context.require_prompt("package set <field> <value>")?;
    let locale = context.config.locale.clone();
    let mut interaction = DialoguerInteraction::new();
    let mut wizard = PackageWizard::new(&mut context.package, &locale);
    let outcome = wizard.run(&mut interaction)?;
    match outcome {
        FormResult::Completed(summary) => {
            print_summary(&summary, &locale);
            io::print_hint(CONFIRM_HINT);
        }
        FormResult::Cancelled => io::print_info("Wizard closed. Your answers are kept."),
    }
    Ok(())
}
