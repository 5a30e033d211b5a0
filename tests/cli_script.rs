use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trip_desk_cli").unwrap();
    cmd.env("TRIP_DESK_CLI_SCRIPT", "1")
        .env("TRIP_DESK_HOME", home)
        .env("TRIP_DESK_API_DELAY_MS", "0")
        .env("TRIP_DESK_TYPING_DELAY_MS", "0");
    cmd
}

#[test]
fn package_summary_reports_choices_and_defaults() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
package set trip_type leisure
package submit
package next
package next
package next
package set budget comfort
package next
package next
package next
package submit
package confirm
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Package Summary")
                .and(contains("Type: Leisure"))
                .and(contains("₹10000-₹30000"))
                .and(contains("No activities selected"))
                .and(contains("Destination: Not specified"))
                .and(contains("Package booked: Leisure trip to Not specified."))
                .and(contains("submit is only available on the last step")),
        );
}

#[test]
fn booking_create_list_and_calendar() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
booking create \"Priya Nair\" Goa 2024-03-10 2024-03-12 1500 package pending
booking create \"\" Goa 2024-03-12 2024-03-10 abc
booking list pending
booking calendar 2024-03
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Booking BK004 created for Priya Nair.")
                .and(contains("End date must be after start date"))
                .and(contains("Invalid amount"))
                .and(contains("March 2024"))
                .and(contains("John Doe"))
                .and(contains("Priya Nair (Pending)")),
        );
}

#[test]
fn analytics_export_writes_text_report() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
analytics export txt
analytics export pdf
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Report saved to").and(contains("PDF export")));

    let reports: Vec<_> = std::fs::read_dir(home.path().join("reports"))
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    assert_eq!(reports.len(), 1);

    let pattern = r"^analytics_report_\d{4}-\d{2}-\d{2}\.txt$";
    let name_pattern = regex::Regex::new(pattern).unwrap();
    let file_name = reports[0].file_name().unwrap();
    let name = file_name.to_string_lossy();
    assert!(name_pattern.is_match(&name), "unexpected file name {name}");

    let body = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(body.starts_with("Analytics Report\nGenerated on: "));
    assert!(body.contains("Top Destinations:"));
}

#[test]
fn assistant_hotel_search_lists_matches() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
assistant
assistant option 1
assistant search Maldives 2024-06-01 2024-06-05 2
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("I'm your personal travel assistant")
                .and(contains("I found 1 hotels matching your criteria"))
                .and(contains("Grand Resort & Spa"))
                .and(contains("[1] New Search")),
        );
}

#[test]
fn assistant_failures_offer_retry() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
config set simulate_failures true
assistant say any hotels?
assistant hotels
assistant search Dubai
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("error processing your request")
                .and(contains("error while searching for hotels"))
                .and(contains("[1] Try Again")),
        );
}

#[test]
fn itinerary_days_step_and_clamp() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
itinerary view india
itinerary next
itinerary next
itinerary view atlantis
exit
";

    script_command(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Incredible India").and(contains("Old Delhi Tour")));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = tempfile::tempdir().unwrap();

    script_command(home.path())
        .write_stdin("pakage show\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Unknown command `pakage`")
                .and(contains("Suggestion: `package`?")),
        );
}
