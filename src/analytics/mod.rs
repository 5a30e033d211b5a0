//! Static dashboard figures and the analytics report export.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::DeskError;
use crate::utils::{formatting::format_date, persistence::write_atomic};

pub const PDF_NOTICE: &str = "PDF export would be implemented with a PDF library in production";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenuePoint {
    pub month: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DestinationStat {
    pub name: &'static str,
    pub bookings: u32,
    pub revenue: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub action: &'static str,
    pub time: &'static str,
}

pub const METRICS: &[Metric] = &[
    Metric {
        name: "Total Bookings",
        value: "123",
        change: "+12.5%",
    },
    Metric {
        name: "Active Customers",
        value: "567",
        change: "+5.2%",
    },
    Metric {
        name: "Revenue",
        value: "₹1,23,458",
        change: "+8.1%",
    },
    Metric {
        name: "Package Sales",
        value: "156",
        change: "+15.3%",
    },
];

pub const REVENUE: &[RevenuePoint] = &[
    RevenuePoint {
        month: "Jan",
        value: 45000,
    },
    RevenuePoint {
        month: "Feb",
        value: 52000,
    },
    RevenuePoint {
        month: "Mar",
        value: 49000,
    },
    RevenuePoint {
        month: "Apr",
        value: 63000,
    },
    RevenuePoint {
        month: "May",
        value: 58000,
    },
    RevenuePoint {
        month: "Jun",
        value: 71000,
    },
];

pub const TOP_DESTINATIONS: &[DestinationStat] = &[
    DestinationStat {
        name: "Maldives",
        bookings: 245,
        revenue: 612500,
    },
    DestinationStat {
        name: "Dubai",
        bookings: 198,
        revenue: 495000,
    },
    DestinationStat {
        name: "Singapore",
        bookings: 167,
        revenue: 417500,
    },
    DestinationStat {
        name: "Bali",
        bookings: 156,
        revenue: 390000,
    },
    DestinationStat {
        name: "Paris",
        bookings: 134,
        revenue: 335000,
    },
];

pub const RECENT_ACTIVITY: &[ActivityEntry] = &[
    ActivityEntry {
        action: "New booking - Maldives",
        time: "5 minutes ago",
    },
    ActivityEntry {
        action: "Booking confirmed - Dubai",
        time: "1 hour ago",
    },
    ActivityEntry {
        action: "Payment received - Singapore",
        time: "2 hours ago",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Txt,
    Pdf,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Txt => f.write_str("txt"),
            ReportFormat::Pdf => f.write_str("pdf"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ReportFormat::Txt),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(DeskError::InvalidInput(format!(
                "unsupported report format `{}` (expected txt or pdf)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(PathBuf),
    /// Nothing was written; carries the notice to show instead.
    Unsupported(&'static str),
}

/// Plain-text report; `generated_on` is rendered in the locale's short form.
pub fn text_report(generated_on: NaiveDate, locale: &str) -> String {
    let metrics: Vec<String> = METRICS
        .iter()
        .map(|m| format!("{}: {} ({})", m.name, m.value, m.change))
        .collect();
    let revenue: Vec<String> = REVENUE
        .iter()
        .map(|point| format!("{}: ${}", point.month, point.value))
        .collect();
    let destinations: Vec<String> = TOP_DESTINATIONS
        .iter()
        .map(|d| format!("{}: {} bookings, ${}", d.name, d.bookings, d.revenue))
        .collect();

    format!(
        "Analytics Report\nGenerated on: {}\n\nKey Metrics:\n{}\n\nRevenue Overview:\n{}\n\nTop Destinations:\n{}",
        format_date(locale, generated_on),
        metrics.join("\n"),
        revenue.join("\n"),
        destinations.join("\n")
    )
}

pub fn report_file_name(date: NaiveDate) -> String {
    format!("analytics_report_{}.txt", date.format("%Y-%m-%d"))
}

pub fn export(
    format: ReportFormat,
    dir: &Path,
    date: NaiveDate,
    locale: &str,
) -> Result<ExportOutcome, DeskError> {
    match format {
        ReportFormat::Txt => {
            let path = dir.join(report_file_name(date));
            write_atomic(&path, &text_report(date, locale))?;
            tracing::info!(path = %path.display(), "analytics report exported");
            Ok(ExportOutcome::Written(path))
        }
        ReportFormat::Pdf => {
            tracing::debug!("pdf export requested");
            Ok(ExportOutcome::Unsupported(PDF_NOTICE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 12).unwrap()
    }

    #[test]
    fn report_lists_every_section() {
        let report = text_report(day(), "en-US");
        let header = "Analytics Report\nGenerated on: 4/12/2024\n\nKey Metrics:\n";
        assert!(report.starts_with(header));
        for metric in METRICS {
            let line = format!("{}: {} ({})", metric.name, metric.value, metric.change);
            assert!(report.contains(&line));
        }
        assert!(report.contains("Revenue Overview:\nJan: $45000\n"));
        assert!(report.ends_with("Paris: 134 bookings, $335000"));
    }

    #[test]
    fn txt_export_writes_dated_file() {
        let dir = TempDir::new().unwrap();
        let reports = dir.path().join("reports");
        let outcome = export(ReportFormat::Txt, &reports, day(), "en-GB").unwrap();
        let ExportOutcome::Written(path) = outcome else {
            panic!("expected a written report");
        };
        assert!(path.ends_with("analytics_report_2024-04-12.txt"));
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("Generated on: 12/04/2024"));
    }

    #[test]
    fn pdf_export_returns_notice() {
        let dir = TempDir::new().unwrap();
        let outcome = export(ReportFormat::Pdf, dir.path(), day(), "en-US").unwrap();
        assert_eq!(outcome, ExportOutcome::Unsupported(PDF_NOTICE));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn formats_parse() {
        assert_eq!("TXT".parse::<ReportFormat>().unwrap(), ReportFormat::Txt);
        assert!("csv".parse::<ReportFormat>().is_err());
    }
}
