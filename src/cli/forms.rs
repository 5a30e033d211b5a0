//! Step-by-step package builder prompts.
//!
//! [`PackageWizard`] walks the builder's steps one field at a time and hands
//! every prompt to a [`FormInteraction`], so the same flow runs against
//! dialoguer in the terminal and against scripted responses in tests.

use std::collections::BTreeSet;

use crossterm::terminal;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::errors::DeskError;
use crate::packages::{FieldKey, FieldUpdate, PackageBuilder, PackageSummary, StepDefinition};

const TEXT_HINT: &str = "Enter keeps the current value; :back, :help and :cancel also work.";

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// Keep whatever the field currently holds.
    Keep,
    Cancel,
    /// Go back to the previous field.
    Back,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

pub struct PromptContext<'a> {
    pub step: &'a StepDefinition,
    pub field: FieldKey,
    pub current: Option<String>,
    pub step_index: usize,
    pub step_count: usize,
    pub progress: u8,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;

    fn show_help(&mut self, context: &PromptContext<'_>) {
        io::print_info(field_help(context.field));
    }

    fn report_invalid(&mut self, message: &str) {
        io::print_warning(message);
    }
}

pub(crate) fn field_help(field: FieldKey) -> String {
    match field.options() {
        Some(table) => {
            let choices: Vec<String> = table
                .iter()
                .enumerate()
                .map(|(index, entry)| format!("{}={} ({})", index + 1, entry.id, entry.label))
                .collect();
            format!("{}: {}", field.label(), choices.join(", "))
        }
        None => match field {
            FieldKey::StartDate | FieldKey::EndDate => {
                format!("{}: YYYY-MM-DD, blank to clear", field.label())
            }
            FieldKey::Travelers | FieldKey::ChildrenCount => {
                format!("{}: a whole number", field.label())
            }
            _ => format!("{}: free text", field.label()),
        },
    }
}

/// Text progress bar sized to the terminal.
pub(crate) fn progress_bar(percent: u8) -> String {
    let (columns, _) = terminal::size().unwrap_or((80, 0));
    let width = usize::from(columns).saturating_sub(10).clamp(10, 40);
    let filled = width * usize::from(percent.min(100)) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        percent
    )
}

/// Terminal implementation backed by dialoguer prompts.
pub struct DialoguerInteraction {
    theme: ColorfulTheme,
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn print_step_header(&self, context: &PromptContext<'_>) {
        output_section(format!(
            "Step {} / {}: {}",
            context.step_index + 1,
            context.step_count,
            context.step.title
        ));
        io::print_info(context.step.description);
        println!("{}", progress_bar(context.progress));
    }

    fn prompt_choice(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let Some(table) = context.field.options() else {
            return self.prompt_text(context);
        };
        let mut items: Vec<String> = table.iter().map(|entry| entry.label.to_string()).collect();
        let keep = items.len();
        items.push("Keep current".into());
        items.push("Back".into());
        items.push("Cancel".into());
        let default = context
            .current
            .as_deref()
            .and_then(|value| table.iter().position(|entry| entry.id == value))
            .unwrap_or(keep);

        match Select::with_theme(&self.theme)
            .with_prompt(context.field.label())
            .items(&items)
            .default(default)
            .interact_opt()
        {
            Ok(Some(index)) if index < keep => PromptResponse::Value(table[index].id.to_string()),
            Ok(Some(index)) if index == keep => PromptResponse::Keep,
            Ok(Some(index)) if index == keep + 1 => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        }
    }

    fn prompt_activities(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let Some(table) = context.field.options() else {
            return PromptResponse::Keep;
        };
        let current = context.current.clone().unwrap_or_default();
        let selected: Vec<bool> = table
            .iter()
            .map(|entry| current.split(',').any(|id| id == entry.id))
            .collect();
        let labels: Vec<&str> = table.iter().map(|entry| entry.label).collect();

        match MultiSelect::with_theme(&self.theme)
            .with_prompt("Activities (space toggles, enter accepts, esc cancels)")
            .items(&labels)
            .defaults(&selected)
            .interact_opt()
        {
            Ok(Some(chosen)) => PromptResponse::Value(
                chosen
                    .into_iter()
                    .map(|index| table[index].id)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => PromptResponse::Cancel,
        }
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        io::print_hint(TEXT_HINT);
        let prompt = match &context.current {
            Some(current) => format!("{} [{}]", context.field.label(), current),
            None => context.field.label().to_string(),
        };
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text();
        match input {
            Ok(value) => match value.trim() {
                "" => PromptResponse::Keep,
                ":back" => PromptResponse::Back,
                ":help" => PromptResponse::Help,
                ":cancel" => PromptResponse::Cancel,
                other => PromptResponse::Value(other.to_string()),
            },
            Err(_) => PromptResponse::Cancel,
        }
    }
}

impl FormInteraction for DialoguerInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        if context.step.fields.first() == Some(&context.field) {
            self.print_step_header(context);
        }
        match context.field {
            FieldKey::Activities => self.prompt_activities(context),
            field if field.options().is_some() => self.prompt_choice(context),
            _ => self.prompt_text(context),
        }
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        for line in lines {
            println!("{}", line);
        }
        let items = ["Submit", "Back", "Cancel"];
        match Select::with_theme(&self.theme)
            .with_prompt("Review your package")
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(Some(0)) => ConfirmationResponse::Confirm,
            Ok(Some(1)) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

/// Drives a [`PackageBuilder`] through its steps and submits it.
pub struct PackageWizard<'a> {
    builder: &'a mut PackageBuilder,
    locale: &'a str,
}

impl<'a> PackageWizard<'a> {
    pub fn new(builder: &'a mut PackageBuilder, locale: &'a str) -> Self {
        Self { builder, locale }
    }

    /// Prompts from the builder's current step to the end, then asks for
    /// confirmation. Answers given before a cancel are kept.
    pub fn run<I: FormInteraction>(
        &mut self,
        interaction: &mut I,
    ) -> Result<FormResult<PackageSummary>, DeskError> {
        self.builder.back_to_form();
        let positions: Vec<(usize, FieldKey)> = crate::packages::STEPS
            .iter()
            .enumerate()
            .flat_map(|(index, step)| step.fields.iter().map(move |field| (index, *field)))
            .collect();
        let mut position = positions
            .iter()
            .position(|(step, _)| *step == self.builder.cursor().index())
            .unwrap_or(0);

        loop {
            if position == positions.len() {
                let summary = PackageSummary::project(self.builder.answers());
                let lines = summary_lines(&summary, self.locale);
                match interaction.confirm(&lines) {
                    ConfirmationResponse::Confirm => {
                        self.move_to_step(crate::packages::STEPS.len() - 1);
                        return Ok(FormResult::Completed(self.builder.submit()?));
                    }
                    ConfirmationResponse::Back => {
                        position -= 1;
                        continue;
                    }
                    ConfirmationResponse::Cancel => return Ok(FormResult::Cancelled),
                }
            }

            let (step_index, field) = positions[position];
            self.move_to_step(step_index);
            let cursor = self.builder.cursor();
            let context = PromptContext {
                step: self.builder.current_step(),
                field,
                current: self.builder.answers().raw_value(field),
                step_index,
                step_count: cursor.step_count(),
                progress: cursor.progress_percent(),
            };

            match interaction.prompt_field(&context) {
                PromptResponse::Value(raw) => match self.apply(field, &raw) {
                    Ok(()) => position += 1,
                    Err(err) => interaction.report_invalid(&err.to_string()),
                },
                PromptResponse::Keep => position += 1,
                PromptResponse::Back => position = position.saturating_sub(1),
                PromptResponse::Help => interaction.show_help(&context),
                PromptResponse::Cancel => return Ok(FormResult::Cancelled),
            }
        }
    }

    fn move_to_step(&mut self, target: usize) {
        while self.builder.cursor().index() < target {
            self.builder.advance();
        }
        while self.builder.cursor().index() > target {
            self.builder.retreat();
        }
    }

    fn apply(&mut self, field: FieldKey, raw: &str) -> Result<(), DeskError> {
        if field != FieldKey::Activities {
            self.builder.set_field(FieldUpdate::parse(field, raw)?);
            return Ok(());
        }

        // The activities prompt answers with the full selection.
        let mut wanted = BTreeSet::new();
        let parts = raw.split(',').map(str::trim);
        for part in parts.filter(|part| !part.is_empty()) {
            if let FieldUpdate::ToggleActivity(id) = FieldUpdate::parse(field, part)? {
                wanted.insert(id);
            }
        }
        let current = self.builder.answers().activities.clone();
        for id in current.symmetric_difference(&wanted) {
            let toggle = FieldUpdate::ToggleActivity(id.clone());
            self.builder.set_field(toggle);
        }
        Ok(())
    }
}

/// Summary sections flattened into printable lines.
pub(crate) fn summary_lines(summary: &PackageSummary, locale: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (title, entries) in summary.sections(locale) {
        lines.push(format!("{}:", title));
        for entry in entries {
            lines.push(format!("  {}", entry));
        }
    }
    lines
}
