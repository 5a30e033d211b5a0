use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::formatting::format_date;

use super::answers::WizardAnswers;
use super::options::{
    budget_range_for, find, label_for, ACCOMMODATION_TYPES, ACTIVITIES, NOT_SPECIFIED,
    TRANSPORTATION_TYPES, TRIP_TYPES,
};

pub const NO_ACTIVITIES: &str = "No activities selected";

/// Read-only projection of submitted answers into display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub trip_type: &'static str,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    /// Price range of the chosen tier rather than its name.
    pub budget: &'static str,
    pub accommodation: &'static str,
    pub activities: Vec<&'static str>,
    pub transportation: &'static str,
}

impl PackageSummary {
    pub fn project(answers: &WizardAnswers) -> Self {
        let mut activities: Vec<&'static str> = ACTIVITIES
            .iter()
            .filter(|entry| answers.has_activity(entry.id))
            .map(|entry| entry.label)
            .collect();
        let unknown = answers
            .activities
            .iter()
            .filter(|id| find(id, ACTIVITIES).is_none())
            .count();
        activities.extend(vec![NOT_SPECIFIED; unknown]);

        Self {
            trip_type: label_for(answers.trip_type.as_deref(), TRIP_TYPES),
            destination: answers
                .destination
                .clone()
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            start_date: answers.start_date,
            end_date: answers.end_date,
            adults: answers.travelers,
            children: answers.children_count,
            budget: budget_range_for(answers.budget.as_deref()),
            accommodation: label_for(answers.accommodation_type.as_deref(), ACCOMMODATION_TYPES),
            activities,
            transportation: label_for(answers.transportation.as_deref(), TRANSPORTATION_TYPES),
        }
    }

    pub fn activities_text(&self) -> String {
        if self.activities.is_empty() {
            NO_ACTIVITIES.to_string()
        } else {
            self.activities.join(", ")
        }
    }

    pub fn dates_text(&self, locale: &str) -> String {
        let render = |date: Option<NaiveDate>| {
            date.map(|d| format_date(locale, d))
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };
        format!("{} - {}", render(self.start_date), render(self.end_date))
    }

    /// Sections in display order, each with its labelled lines.
    pub fn sections(&self, locale: &str) -> Vec<(&'static str, Vec<String>)> {
        let count = |value: Option<u32>| {
            value
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };
        vec![
            (
                "Trip Details",
                vec![
                    format!("Type: {}", self.trip_type),
                    format!("Destination: {}", self.destination),
                    format!("Dates: {}", self.dates_text(locale)),
                ],
            ),
            (
                "Travelers",
                vec![
                    format!("Adults: {}", count(self.adults)),
                    format!("Children: {}", count(self.children)),
                ],
            ),
            ("Budget", vec![self.budget.to_string()]),
            ("Accommodation", vec![self.accommodation.to_string()]),
            ("Activities", vec![self.activities_text()]),
            ("Transportation", vec![self.transportation.to_string()]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::answers::FieldUpdate;

    #[test]
    fn leisure_comfort_without_activities() {
        let mut answers = WizardAnswers::default();
        answers.set_field(FieldUpdate::TripType("leisure".into()));
        answers.set_field(FieldUpdate::Budget("comfort".into()));

        let summary = PackageSummary::project(&answers);
        assert_eq!(summary.trip_type, "Leisure");
        assert_eq!(summary.budget, "₹10000-₹30000");
        assert_eq!(summary.activities_text(), "No activities selected");
        assert_eq!(summary.destination, "Not specified");
        assert_eq!(summary.transportation, "Not specified");
    }

    #[test]
    fn activities_follow_table_order() {
        let mut answers = WizardAnswers::default();
        for id in ["food", "sightseeing", "skydiving"] {
            answers.set_field(FieldUpdate::ToggleActivity(id.into()));
        }
        let summary = PackageSummary::project(&answers);
        assert_eq!(
            summary.activities,
            vec!["Sightseeing", "Food Tours", "Not specified"]
        );
    }

    #[test]
    fn sections_render_dates_and_counts() {
        let mut answers = WizardAnswers::default();
        let christmas_eve = NaiveDate::from_ymd_opt(2024, 12, 24);
        answers.set_field(FieldUpdate::StartDate(christmas_eve));
        answers.set_field(FieldUpdate::Travelers(2));

        let sections = PackageSummary::project(&answers).sections("en-US");
        let (title, trip) = &sections[0];
        assert_eq!(*title, "Trip Details");
        assert_eq!(trip[2], "Dates: 12/24/2024 - Not specified");
        let (_, travelers) = &sections[1];
        assert_eq!(travelers[0], "Adults: 2");
        assert_eq!(travelers[1], "Children: Not specified");
    }
}
