use chrono::{Datelike, Months, NaiveDate};

use super::Booking;

/// The month shown by the bookings calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    first: NaiveDate,
}

impl CalendarCursor {
    /// Cursor on the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn next(&mut self) {
        if let Some(next) = self.first.checked_add_months(Months::new(1)) {
            self.first = next;
        }
    }

    pub fn previous(&mut self) {
        if let Some(previous) = self.first.checked_sub_months(Months::new(1)) {
            self.first = previous;
        }
    }

    /// "March 2024".
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first.month();
        self.first
            .iter_days()
            .take_while(move |day| day.month() == month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    /// Bookings starting or ending on this day.
    pub bookings: Vec<&'a Booking>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCalendar<'a> {
    pub cursor: CalendarCursor,
    pub days: Vec<CalendarDay<'a>>,
}

impl<'a> MonthCalendar<'a> {
    pub(super) fn build(cursor: CalendarCursor, bookings: &'a [Booking]) -> Self {
        let days = cursor
            .days()
            .map(|date| CalendarDay {
                date,
                bookings: bookings
                    .iter()
                    .filter(|booking| booking.start_date == date || booking.end_date == date)
                    .collect(),
            })
            .collect();
        Self { cursor, days }
    }

    /// Days that have at least one booking edge.
    pub fn busy_days(&self) -> impl Iterator<Item = &CalendarDay<'a>> {
        self.days.iter().filter(|day| !day.bookings.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::BookingDesk;

    #[test]
    fn march_2024_marks_start_and_end_days() {
        let desk = BookingDesk::new();
        let cursor = CalendarCursor::month(2024, 3).unwrap();
        let calendar = desk.calendar(cursor);
        assert_eq!(calendar.days.len(), 31);

        let busy: Vec<(u32, Vec<&str>)> = calendar
            .busy_days()
            .map(|day| {
                let names = day.bookings.iter().map(|b| b.customer_name.as_str());
                (day.date.day(), names.collect())
            })
            .collect();
        assert_eq!(
            busy,
            vec![
                (20, vec!["John Doe"]),
                (25, vec!["Alice Smith"]),
                (27, vec!["John Doe"]),
            ]
        );
    }

    #[test]
    fn cursor_moves_across_years() {
        let mut cursor = CalendarCursor::month(2024, 1).unwrap();
        cursor.previous();
        assert_eq!(cursor.label(), "December 2023");
        cursor.next();
        cursor.next();
        assert_eq!(cursor.label(), "February 2024");
        assert_eq!(cursor.days().count(), 29);
    }

    #[test]
    fn containing_snaps_to_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 17).unwrap();
        let cursor = CalendarCursor::containing(date);
        let first = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(cursor.first_day(), first);
        assert!(CalendarCursor::month(2024, 13).is_none());
    }
}
