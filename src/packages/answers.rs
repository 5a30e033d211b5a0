use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DeskError;

use super::options::{
    OptionEntry, ACCOMMODATION_TYPES, ACTIVITIES, BUDGET_RANGES, TRANSPORTATION_TYPES, TRIP_TYPES,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifies one field of the package builder form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    TripType,
    Destination,
    StartDate,
    EndDate,
    Travelers,
    ChildrenCount,
    Budget,
    AccommodationType,
    Activities,
    Transportation,
}

impl FieldKey {
    pub const ALL: [FieldKey; 10] = [
        FieldKey::TripType,
        FieldKey::Destination,
        FieldKey::StartDate,
        FieldKey::EndDate,
        FieldKey::Travelers,
        FieldKey::ChildrenCount,
        FieldKey::Budget,
        FieldKey::AccommodationType,
        FieldKey::Activities,
        FieldKey::Transportation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldKey::TripType => "trip_type",
            FieldKey::Destination => "destination",
            FieldKey::StartDate => "start_date",
            FieldKey::EndDate => "end_date",
            FieldKey::Travelers => "travelers",
            FieldKey::ChildrenCount => "children_count",
            FieldKey::Budget => "budget",
            FieldKey::AccommodationType => "accommodation_type",
            FieldKey::Activities => "activities",
            FieldKey::Transportation => "transportation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::TripType => "Trip type",
            FieldKey::Destination => "Destination",
            FieldKey::StartDate => "Start date",
            FieldKey::EndDate => "End date",
            FieldKey::Travelers => "Number of adults",
            FieldKey::ChildrenCount => "Number of children",
            FieldKey::Budget => "Budget",
            FieldKey::AccommodationType => "Accommodation",
            FieldKey::Activities => "Activities",
            FieldKey::Transportation => "Transportation",
        }
    }

    /// Accepts both `snake_case` keys and the camelCase form names.
    pub fn from_key(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        FieldKey::ALL
            .into_iter()
            .find(|field| field.key().replace('_', "") == normalized)
    }

    /// Option table backing a choice field.
    pub fn options(self) -> Option<&'static [OptionEntry]> {
        match self {
            FieldKey::TripType => Some(TRIP_TYPES),
            FieldKey::Budget => Some(BUDGET_RANGES),
            FieldKey::AccommodationType => Some(ACCOMMODATION_TYPES),
            FieldKey::Activities => Some(ACTIVITIES),
            FieldKey::Transportation => Some(TRANSPORTATION_TYPES),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single typed change to [`WizardAnswers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    TripType(String),
    Destination(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Travelers(u32),
    ChildrenCount(u32),
    Budget(String),
    AccommodationType(String),
    /// Adds the activity when absent, removes it when present.
    ToggleActivity(String),
    Transportation(String),
}

impl FieldUpdate {
    /// Converts raw text into an update for `key`.
    ///
    /// Only type conversion happens here: counts must be whole numbers and
    /// dates must be `YYYY-MM-DD`. Choice fields resolve an option id, label
    /// or 1-based position; anything else is stored verbatim and later shows
    /// up as "Not specified" in the summary.
    pub fn parse(key: FieldKey, raw: &str) -> Result<Self, DeskError> {
        let trimmed = raw.trim();
        let update = match key {
            FieldKey::TripType => FieldUpdate::TripType(resolve_choice(key, trimmed)),
            FieldKey::Destination => FieldUpdate::Destination(trimmed.to_string()),
            FieldKey::StartDate => FieldUpdate::StartDate(parse_date(key, trimmed)?),
            FieldKey::EndDate => FieldUpdate::EndDate(parse_date(key, trimmed)?),
            FieldKey::Travelers => FieldUpdate::Travelers(parse_count(key, trimmed)?),
            FieldKey::ChildrenCount => FieldUpdate::ChildrenCount(parse_count(key, trimmed)?),
            FieldKey::Budget => FieldUpdate::Budget(resolve_choice(key, trimmed)),
            FieldKey::AccommodationType => {
                FieldUpdate::AccommodationType(resolve_choice(key, trimmed))
            }
            FieldKey::Activities => FieldUpdate::ToggleActivity(resolve_choice(key, trimmed)),
            FieldKey::Transportation => FieldUpdate::Transportation(resolve_choice(key, trimmed)),
        };
        Ok(update)
    }

    pub fn key(&self) -> FieldKey {
        match self {
            FieldUpdate::TripType(_) => FieldKey::TripType,
            FieldUpdate::Destination(_) => FieldKey::Destination,
            FieldUpdate::StartDate(_) => FieldKey::StartDate,
            FieldUpdate::EndDate(_) => FieldKey::EndDate,
            FieldUpdate::Travelers(_) => FieldKey::Travelers,
            FieldUpdate::ChildrenCount(_) => FieldKey::ChildrenCount,
            FieldUpdate::Budget(_) => FieldKey::Budget,
            FieldUpdate::AccommodationType(_) => FieldKey::AccommodationType,
            FieldUpdate::ToggleActivity(_) => FieldKey::Activities,
            FieldUpdate::Transportation(_) => FieldKey::Transportation,
        }
    }
}

fn resolve_choice(key: FieldKey, raw: &str) -> String {
    let Some(table) = key.options() else {
        return raw.to_string();
    };
    let by_name = table
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(raw) || entry.label.eq_ignore_ascii_case(raw));
    let by_index = || {
        raw.parse::<usize>()
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| table.get(index))
    };
    by_name
        .or_else(by_index)
        .map(|entry| entry.id.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(key: FieldKey, raw: &str) -> Result<Option<NaiveDate>, DeskError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DeskError::InvalidInput(format!("{} must use YYYY-MM-DD", key.label())))
}

fn parse_count(key: FieldKey, raw: &str) -> Result<u32, DeskError> {
    raw.parse::<u32>()
        .map_err(|_| DeskError::InvalidInput(format!("{} must be a whole number", key.label())))
}

/// Everything collected by the package builder. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardAnswers {
    pub trip_type: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: Option<u32>,
    pub children_count: Option<u32>,
    pub budget: Option<String>,
    pub accommodation_type: Option<String>,
    pub activities: BTreeSet<String>,
    pub transportation: Option<String>,
}

impl WizardAnswers {
    pub fn set_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::TripType(value) => self.trip_type = non_empty(value),
            FieldUpdate::Destination(value) => self.destination = non_empty(value),
            FieldUpdate::StartDate(value) => self.start_date = value,
            FieldUpdate::EndDate(value) => self.end_date = value,
            // The adults input has a floor of one.
            FieldUpdate::Travelers(value) => self.travelers = Some(value.max(1)),
            FieldUpdate::ChildrenCount(value) => self.children_count = Some(value),
            FieldUpdate::Budget(value) => self.budget = non_empty(value),
            FieldUpdate::AccommodationType(value) => self.accommodation_type = non_empty(value),
            FieldUpdate::ToggleActivity(value) => {
                if value.is_empty() {
                    return;
                }
                if !self.activities.remove(&value) {
                    self.activities.insert(value);
                }
            }
            FieldUpdate::Transportation(value) => self.transportation = non_empty(value),
        }
    }

    /// Current raw value of a field, suitable as a prompt default.
    pub fn raw_value(&self, key: FieldKey) -> Option<String> {
        match key {
            FieldKey::TripType => self.trip_type.clone(),
            FieldKey::Destination => self.destination.clone(),
            FieldKey::StartDate => self.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            FieldKey::EndDate => self.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            FieldKey::Travelers => self.travelers.map(|n| n.to_string()),
            FieldKey::ChildrenCount => self.children_count.map(|n| n.to_string()),
            FieldKey::Budget => self.budget.clone(),
            FieldKey::AccommodationType => self.accommodation_type.clone(),
            FieldKey::Activities => {
                if self.activities.is_empty() {
                    None
                } else {
                    let ids: Vec<&str> = self.activities.iter().map(String::as_str).collect();
                    Some(ids.join(","))
                }
            }
            FieldKey::Transportation => self.transportation.clone(),
        }
    }

    pub fn has_activity(&self, id: &str) -> bool {
        self.activities.contains(id)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
