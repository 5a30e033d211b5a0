//! Booking list with validated creation, search and a monthly calendar.

mod calendar;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::DeskError;

pub use calendar::{CalendarCursor, CalendarDay, MonthCalendar};

const REQUIRED: &str = "Required";
const DATE_ORDER: &str = "End date must be after start date";
const INVALID_DATE: &str = "Invalid date";
const INVALID_AMOUNT: &str = "Invalid amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending",
            BookingStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

impl FromStr for BookingStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeskError::InvalidInput(format!("unknown booking status `{}`", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Flight,
    Hotel,
    Package,
}

impl BookingKind {
    pub fn key(self) -> &'static str {
        match self {
            BookingKind::Flight => "flight",
            BookingKind::Hotel => "hotel",
            BookingKind::Package => "package",
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BookingKind {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => Ok(BookingKind::Flight),
            "hotel" => Ok(BookingKind::Hotel),
            "package" => Ok(BookingKind::Package),
            other => {
                let message = format!("unknown booking type `{}`", other);
                Err(DeskError::InvalidInput(message))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: BookingKind,
}

static SEED: Lazy<Vec<Booking>> = Lazy::new(|| {
    [
        (
            "BK001",
            "John Doe",
            "Maldives",
            (2024, 3, 20),
            (2024, 3, 27),
            BookingStatus::Confirmed,
            2499.99,
            BookingKind::Package,
        ),
        (
            "BK002",
            "Alice Smith",
            "Dubai",
            (2024, 3, 25),
            (2024, 4, 1),
            BookingStatus::Pending,
            1899.99,
            BookingKind::Hotel,
        ),
        (
            "BK003",
            "Bob Johnson",
            "Singapore",
            (2024, 4, 5),
            (2024, 4, 12),
            BookingStatus::Cancelled,
            1299.99,
            BookingKind::Flight,
        ),
    ]
    .into_iter()
    .filter_map(|(id, name, destination, start, end, status, amount, kind)| {
        Some(Booking {
            id: id.into(),
            customer_name: name.into(),
            destination: destination.into(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2)?,
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2)?,
            status,
            amount,
            kind,
        })
    })
    .collect()
});

/// Raw create-booking input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub customer_name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub status: BookingStatus,
    pub amount: String,
    pub kind: BookingKind,
}

impl BookingForm {
    /// Blank form dated `today`, confirmed hotel booking.
    pub fn blank(today: NaiveDate) -> Self {
        let day = today.format("%Y-%m-%d").to_string();
        Self {
            customer_name: String::new(),
            destination: String::new(),
            start_date: day.clone(),
            end_date: day,
            status: BookingStatus::Confirmed,
            amount: String::new(),
            kind: BookingKind::Hotel,
        }
    }
}

/// Inline messages for each rejected form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFormErrors {
    pub customer_name: Option<&'static str>,
    pub destination: Option<&'static str>,
    pub date: Option<&'static str>,
    pub amount: Option<&'static str>,
}

impl BookingFormErrors {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// `(field, message)` pairs keyed the way the form names its fields.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("customerName", self.customer_name),
            ("destination", self.destination),
            ("date", self.date),
            ("amount", self.amount),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|m| (field, m)))
        .collect()
    }
}

impl fmt::Display for BookingFormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for BookingFormErrors {}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Status filter applied to the booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookingStatus),
}

impl StatusFilter {
    pub fn matches(self, status: BookingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// The session's booking list, seeded with the demo bookings.
#[derive(Debug, Clone)]
pub struct BookingDesk {
    bookings: Vec<Booking>,
}

impl Default for BookingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingDesk {
    pub fn new() -> Self {
        Self {
            bookings: SEED.clone(),
        }
    }

    pub fn empty() -> Self {
        Self {
            bookings: Vec::new(),
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|booking| booking.id.eq_ignore_ascii_case(id.trim()))
    }

    /// Validates `form` and appends the booking. Nothing changes on error.
    pub fn create(&mut self, form: &BookingForm) -> Result<&Booking, BookingFormErrors> {
        let mut errors = BookingFormErrors::default();
        if form.customer_name.trim().is_empty() {
            errors.customer_name = Some(REQUIRED);
        }
        if form.destination.trim().is_empty() {
            errors.destination = Some(REQUIRED);
        }
        let dates = match (parse_day(&form.start_date), parse_day(&form.end_date)) {
            (Some(start), Some(end)) if start > end => {
                errors.date = Some(DATE_ORDER);
                None
            }
            (Some(start), Some(end)) => Some((start, end)),
            _ => {
                errors.date = Some(INVALID_DATE);
                None
            }
        };
        let amount = form
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite());
        if amount.is_none() {
            errors.amount = Some(INVALID_AMOUNT);
        }

        let (Some((start_date, end_date)), Some(amount), true) = (dates, amount, errors.is_empty())
        else {
            tracing::debug!(%errors, "booking form rejected");
            return Err(errors);
        };

        let booking = Booking {
            id: format!("BK{:03}", self.bookings.len() + 1),
            customer_name: form.customer_name.trim().to_string(),
            destination: form.destination.trim().to_string(),
            start_date,
            end_date,
            status: form.status,
            amount,
            kind: form.kind,
        };
        tracing::info!(id = %booking.id, destination = %booking.destination, "booking created");
        self.bookings.push(booking);
        Ok(&self.bookings[self.bookings.len() - 1])
    }

    /// Bookings passing the status filter whose name, destination or id
    /// contains `query`, ignoring case.
    pub fn filtered(&self, filter: StatusFilter, query: &str) -> Vec<&Booking> {
        let needle = query.trim().to_lowercase();
        self.bookings
            .iter()
            .filter(|booking| filter.matches(booking.status))
            .filter(|booking| {
                booking.customer_name.to_lowercase().contains(&needle)
                    || booking.destination.to_lowercase().contains(&needle)
                    || booking.id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn calendar(&self, cursor: CalendarCursor) -> MonthCalendar<'_> {
        MonthCalendar::build(cursor, &self.bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, start: &str, end: &str, amount: &str) -> BookingForm {
        BookingForm {
            customer_name: name.into(),
            destination: "Bali".into(),
            start_date: start.into(),
            end_date: end.into(),
            status: BookingStatus::Pending,
            amount: amount.into(),
            kind: BookingKind::Package,
        }
    }

    #[test]
    fn seed_matches_demo_data() {
        let desk = BookingDesk::new();
        let ids: Vec<&str> = desk.bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["BK001", "BK002", "BK003"]);
        assert_eq!(desk.get("bk002").map(|b| b.amount), Some(1899.99));
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut desk = BookingDesk::new();
        let first = desk
            .create(&form("Priya Nair", "2024-05-01", "2024-05-08", "3200.50"))
            .unwrap()
            .id
            .clone();
        let second = desk
            .create(&form("Sam Lee", "2024-06-01", "2024-06-01", "0"))
            .unwrap()
            .id
            .clone();
        assert_eq!(first, "BK004");
        assert_eq!(second, "BK005");
        assert_eq!(desk.bookings().len(), 5);
    }

    #[test]
    fn create_reports_every_invalid_field() {
        let mut desk = BookingDesk::new();
        let mut bad = form("  ", "2024-05-08", "2024-05-01", "lots");
        bad.destination.clear();
        let errors = desk.create(&bad).unwrap_err();
        assert_eq!(
            errors.entries(),
            vec![
                ("customerName", "Required"),
                ("destination", "Required"),
                ("date", "End date must be after start date"),
                ("amount", "Invalid amount"),
            ]
        );
        assert_eq!(desk.bookings().len(), 3);
    }

    #[test]
    fn blank_amount_and_bad_dates_are_rejected() {
        let mut desk = BookingDesk::new();
        let errors = desk
            .create(&form("Ann", "2024-13-40", "2024-05-01", ""))
            .unwrap_err();
        assert_eq!(errors.date, Some("Invalid date"));
        assert_eq!(errors.amount, Some("Invalid amount"));
        assert!(errors.customer_name.is_none());
    }

    #[test]
    fn search_combines_with_status_filter() {
        let desk = BookingDesk::new();
        let hits = desk.filtered(StatusFilter::All, "DUBAI");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Alice Smith");

        assert_eq!(desk.filtered(StatusFilter::All, "bk00").len(), 3);
        assert_eq!(desk.filtered(StatusFilter::All, "").len(), 3);

        let pending = StatusFilter::Only(BookingStatus::Pending);
        assert!(desk.filtered(pending, "john").is_empty());
        assert_eq!(desk.filtered(pending, "").len(), 1);
    }

    #[test]
    fn filters_and_kinds_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Cancelled".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(BookingStatus::Cancelled)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!(
            "FLIGHT".parse::<BookingKind>().unwrap(),
            BookingKind::Flight
        );
        assert_eq!(BookingStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn blank_form_uses_today() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let blank = BookingForm::blank(today);
        assert_eq!(blank.start_date, "2024-02-29");
        assert_eq!(blank.kind, BookingKind::Hotel);
        assert_eq!(blank.status, BookingStatus::Confirmed);
    }
}
