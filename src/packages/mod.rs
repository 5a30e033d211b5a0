//! Custom package builder and preset itinerary browsing.
//!
//! The builder is a linear seven-step wizard over [`WizardAnswers`]; once
//! submitted, [`PackageSummary`] projects the answers into display labels.
//! Preset itineraries are a static catalog walked one day at a time by
//! [`ItineraryViewer`].

pub mod answers;
pub mod itinerary;
pub mod options;
pub mod summary;
pub mod wizard;

pub use answers::{FieldKey, FieldUpdate, WizardAnswers};
pub use itinerary::{catalog, DayActivity, ItineraryDay, ItineraryViewer, PresetItinerary};
pub use options::{label_for, OptionEntry, NOT_SPECIFIED};
pub use summary::PackageSummary;
pub use wizard::{BuilderMode, PackageBuilder, StepAction, StepCursor, StepDefinition, STEPS};
