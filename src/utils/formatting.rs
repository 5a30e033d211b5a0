use chrono::{Datelike, NaiveDate};

/// Renders a date the way the configured locale writes short dates.
pub fn format_date(locale: &str, date: NaiveDate) -> String {
    match locale {
        "en-US" => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        "en-GB" | "en-IN" => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// Long form used in booking tables, e.g. `Mar 20, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    let month = month_label(date.month());
    format!("{} {}, {}", month, date.day(), date.year())
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

/// Formats an amount with two decimals behind the given currency symbol.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
