//! Command-line front end tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn timesheet(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("timesheet").unwrap();
    cmd.env("TIMESHEET_DATA_DIR", data_dir.path())
        .env("TIMESHEET_USER", "alice@example.com")
        .env_remove("RUST_LOG");
    cmd
}

fn seed(data_dir: &TempDir) {
    timesheet(data_dir)
        .args(["client", "add", "Acme Corp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created client: Acme Corp (ID: 1)"));

    for (day, hours, what) in [("2025-03-03", "2.5", "Kickoff"), ("2025-03-04", "1.25", "Review")] {
        timesheet(data_dir)
            .args(["entry", "add", "1", hours, "--date", day, "-m", what])
            .assert()
            .success();
    }
}

#[test]
fn report_view_json() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    timesheet(&data_dir)
        .args(["report", "view", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_hours\": \"3.75\""))
        .stdout(predicate::str::contains("\"entry_count\": 2"));
}

#[test]
fn report_export_csv_to_file() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);
    let out = data_dir.path().join("acme.csv");

    timesheet(&data_dir)
        .args(["report", "export", "1", "--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Content-Type: text/csv"));

    let body = std::fs::read_to_string(&out).unwrap();
    assert!(body.contains("2025-03-04,1.25,Review"));
    assert!(body.contains("Total Entries,2"));

    let staging = data_dir.path().join("tmp").join("exports");
    assert_eq!(std::fs::read_dir(staging).unwrap().count(), 0);
}

#[test]
fn report_export_pdf_to_stdout() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    timesheet(&data_dir)
        .args(["report", "export", "1", "--format", "pdf", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &[u8]| {
            out.starts_with(b"%PDF-") && out.ends_with(b"%%EOF\n")
        }));
}

#[test]
fn unknown_format_fails() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    timesheet(&data_dir)
        .args(["report", "export", "1", "--format", "xls", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid export format"));
}

#[test]
fn other_user_sees_not_found() {
    let data_dir = TempDir::new().unwrap();
    seed(&data_dir);

    timesheet(&data_dir)
        .env("TIMESHEET_USER", "mallory@example.com")
        .args(["report", "view", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client not found: 1"));
}

#[test]
fn missing_user_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("timesheet").unwrap();
    cmd.env("TIMESHEET_DATA_DIR", data_dir.path())
        .env_remove("TIMESHEET_USER")
        .args(["client", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user given"));
}
