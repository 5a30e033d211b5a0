use super::answers::{FieldKey, FieldUpdate, WizardAnswers};
use super::summary::PackageSummary;
use crate::errors::DeskError;

/// One screen of the package builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldKey],
}

pub const STEPS: &[StepDefinition] = &[
    StepDefinition {
        title: "Trip Type",
        description: "Let's start planning your dream trip",
        fields: &[FieldKey::TripType],
    },
    StepDefinition {
        title: "Destination & Dates",
        description: "Where and when would you like to travel?",
        fields: &[
            FieldKey::Destination,
            FieldKey::StartDate,
            FieldKey::EndDate,
        ],
    },
    StepDefinition {
        title: "Travelers",
        description: "Who will be traveling?",
        fields: &[FieldKey::Travelers, FieldKey::ChildrenCount],
    },
    StepDefinition {
        title: "Budget",
        description: "What is your budget range?",
        fields: &[FieldKey::Budget],
    },
    StepDefinition {
        title: "Accommodation",
        description: "Where would you like to stay?",
        fields: &[FieldKey::AccommodationType],
    },
    StepDefinition {
        title: "Activities",
        description: "What activities interest you?",
        fields: &[FieldKey::Activities],
    },
    StepDefinition {
        title: "Transportation",
        description: "How would you like to get around?",
        fields: &[FieldKey::Transportation],
    },
];

/// What the forward button does on the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Submit,
}

/// Step index clamped to `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    index: usize,
    len: usize,
}

impl StepCursor {
    /// A cursor over `len` steps; `len` is treated as at least one.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.len
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1).min(self.len - 1);
    }

    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == self.len - 1
    }

    pub fn primary_action(&self) -> StepAction {
        if self.is_last() {
            StepAction::Submit
        } else {
            StepAction::Next
        }
    }

    /// Share of the wizard reached, counting the current step.
    pub fn progress_percent(&self) -> u8 {
        (((self.index + 1) * 100) / self.len) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderMode {
    Editing,
    Summary,
}

/// One package builder session: answers, step cursor and display mode.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    answers: WizardAnswers,
    cursor: StepCursor,
    mode: BuilderMode,
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            answers: WizardAnswers::default(),
            cursor: StepCursor::new(STEPS.len()),
            mode: BuilderMode::Editing,
        }
    }

    pub fn answers(&self) -> &WizardAnswers {
        &self.answers
    }

    pub fn cursor(&self) -> StepCursor {
        self.cursor
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn current_step(&self) -> &'static StepDefinition {
        &STEPS[self.cursor.index()]
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        tracing::trace!(field = %update.key(), "package field updated");
        self.answers.set_field(update);
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn retreat(&mut self) {
        self.cursor.retreat();
    }

    /// Switches to the summary view. Only the last step submits; answers are
    /// taken as they are.
    pub fn submit(&mut self) -> Result<PackageSummary, DeskError> {
        if !self.cursor.is_last() {
            let last = self.cursor.step_count();
            let message = format!("submit is only available on the last step ({})", last);
            return Err(DeskError::InvalidInput(message));
        }
        self.mode = BuilderMode::Summary;
        tracing::info!(
            trip_type = ?self.answers.trip_type,
            activities = self.answers.activities.len(),
            "package submitted"
        );
        Ok(PackageSummary::project(&self.answers))
    }

    /// Summary of the current answers, available once submitted.
    pub fn summary(&self) -> Option<PackageSummary> {
        match self.mode {
            BuilderMode::Summary => Some(PackageSummary::project(&self.answers)),
            BuilderMode::Editing => None,
        }
    }

    /// Leaves the summary and returns to the step that was showing.
    pub fn back_to_form(&mut self) {
        self.mode = BuilderMode::Editing;
    }

    /// Books the package: back to the first step, answers retained.
    pub fn confirm(&mut self) -> PackageSummary {
        let summary = PackageSummary::project(&self.answers);
        self.mode = BuilderMode::Editing;
        self.cursor.reset();
        tracing::info!(destination = ?self.answers.destination, "package confirmed");
        summary
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_seven_steps_covering_every_field() {
        assert_eq!(STEPS.len(), 7);
        let mut covered: Vec<FieldKey> = STEPS
            .iter()
            .flat_map(|s| s.fields.iter().copied())
            .collect();
        covered.sort();
        let mut all = FieldKey::ALL.to_vec();
        all.sort();
        assert_eq!(covered, all);
    }

    #[test]
    fn cursor_stays_in_bounds_for_any_walk() {
        let mut cursor = StepCursor::new(STEPS.len());
        // Deterministic pseudo-random walk mixing both directions.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                cursor.retreat();
            } else {
                cursor.advance();
            }
            assert!(cursor.index() < STEPS.len());
        }
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut cursor = StepCursor::new(3);
        cursor.retreat();
        assert!(cursor.is_first());
        assert_eq!(cursor.primary_action(), StepAction::Next);

        for _ in 0..10 {
            cursor.advance();
        }
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_last());
        assert_eq!(cursor.primary_action(), StepAction::Submit);
        assert_eq!(cursor.progress_percent(), 100);
    }

    #[test]
    fn zero_length_cursor_behaves_as_single_step() {
        let mut cursor = StepCursor::new(0);
        cursor.advance();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.is_first() && cursor.is_last());
    }

    fn walk_to_last(builder: &mut PackageBuilder) {
        while !builder.cursor().is_last() {
            builder.advance();
        }
    }

    #[test]
    fn submit_skips_validation_and_confirm_resets_step() {
        let mut builder = PackageBuilder::new();
        walk_to_last(&mut builder);
        assert!(builder.summary().is_none());

        let summary = builder.submit().unwrap();
        assert_eq!(builder.mode(), BuilderMode::Summary);
        assert_eq!(summary.trip_type, "Not specified");

        builder.back_to_form();
        assert_eq!(builder.cursor().index(), STEPS.len() - 1);

        builder.set_field(FieldUpdate::Destination("Bali".into()));
        builder.submit().unwrap();
        builder.confirm();
        assert_eq!(builder.mode(), BuilderMode::Editing);
        assert_eq!(builder.cursor().index(), 0);
        assert_eq!(builder.answers().destination.as_deref(), Some("Bali"));
    }

    #[test]
    fn submit_before_last_step_stays_editing() {
        let mut builder = PackageBuilder::new();
        builder.advance();
        let err = builder.submit().unwrap_err();
        assert!(matches!(err, DeskError::InvalidInput(_)));
        assert_eq!(builder.mode(), BuilderMode::Editing);
        assert_eq!(builder.cursor().index(), 1);
        assert!(builder.summary().is_none());
    }

    #[test]
    fn reset_clears_answers() {
        let mut builder = PackageBuilder::new();
        builder.set_field(FieldUpdate::TripType("family".into()));
        builder.advance();
        builder.reset();
        assert_eq!(builder.answers(), &WizardAnswers::default());
        assert!(builder.cursor().is_first());
    }
}
