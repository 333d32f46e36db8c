#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("cli").expect("cli binary")
}

fn temp_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

const DIAMOND_JSON: &str = r#"{
  "metadata": {"project_name": "Diamond", "project_start_date": "2025-01-27"},
  "activities": [
    {"id": "A", "duration_days": 2, "budgeted_cost": 200},
    {"id": "B", "duration_days": 3, "predecessor_ids": ["A"], "budgeted_cost": 300},
    {"id": "C", "duration_days": 5, "predecessor_ids": ["A"], "budgeted_cost": 500},
    {"id": "D", "duration_days": 1, "predecessor_ids": ["B", "C"]}
  ]
}"#;

#[test]
fn schedule_prints_critical_path_and_duration() {
    let input = temp_with_suffix(".json", DIAMOND_JSON);
    cli()
        .arg("schedule")
        .arg(input.path())
        .assert()
        .success()
        .stdout(str_contains("Diamond: 8 days, 1000.00 AED, critical path A → C → D"))
        .stdout(str_contains("Critical Path: A → C → D"))
        .stdout(str_contains("Total Project Duration: 8 days"))
        .stdout(str_contains("2025-01"));
}

#[test]
fn schedule_reads_csv_and_applies_overrides() {
    let input = temp_with_suffix(
        ".csv",
        "id,name,duration_days,predecessor_ids,budgeted_cost\nA,Excavation,3,,100\nB,Foundation,4,A,100\n",
    );
    cli()
        .arg("schedule")
        .arg(input.path())
        .args(["--name", "Override", "--start", "2025-06-01"])
        .assert()
        .success()
        .stdout(str_contains("Override"))
        .stdout(str_contains("2025-06-07"))
        .stdout(str_contains("Critical Path: A → B"));
}

#[test]
fn schedule_writes_requested_outputs() {
    let input = temp_with_suffix(".json", DIAMOND_JSON);
    let report = NamedTempFile::new().unwrap();
    let table = NamedTempFile::new().unwrap();
    let cash = NamedTempFile::new().unwrap();
    cli()
        .arg("schedule")
        .arg(input.path())
        .arg("--report")
        .arg(report.path())
        .arg("--table-csv")
        .arg(table.path())
        .arg("--cash-flow-csv")
        .arg(cash.path())
        .assert()
        .success();

    let report_text = std::fs::read_to_string(report.path()).unwrap();
    assert!(report_text.contains("\"project_duration_days\": 8"));
    let table_text = std::fs::read_to_string(table.path()).unwrap();
    assert_eq!(table_text.lines().count(), 5);
    let cash_text = std::fs::read_to_string(cash.path()).unwrap();
    assert!(cash_text.starts_with("month_index,month"));
}

#[test]
fn schedule_reports_cycles_and_fails() {
    let input = temp_with_suffix(
        ".json",
        r#"{"activities":[
            {"id":"A","duration_days":1,"predecessor_ids":["B"]},
            {"id":"B","duration_days":1,"predecessor_ids":["A"]}
        ]}"#,
    );
    cli()
        .arg("schedule")
        .arg(input.path())
        .assert()
        .failure()
        .code(1)
        .stderr(str_contains("Error:"))
        .stderr(str_contains("cyclic dependency"));
}

#[test]
fn validate_names_unknown_predecessor() {
    let input = temp_with_suffix(
        ".json",
        r#"{"activities":[{"id":"A","duration_days":1,"predecessor_ids":["ghost"]}]}"#,
    );
    cli()
        .arg("validate")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(str_contains("unknown predecessor 'ghost'"));
}

#[test]
fn validate_accepts_good_input() {
    let input = temp_with_suffix(".json", DIAMOND_JSON);
    cli()
        .arg("validate")
        .arg(input.path())
        .assert()
        .success()
        .stdout(str_contains("OK: 4 activities"));
}

#[test]
fn template_output_schedules_cleanly() {
    let out = Builder::new().suffix(".json").tempfile().unwrap();
    cli()
        .args(["template", "--budget", "250000", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(str_contains("Template written to"));

    cli()
        .arg("schedule")
        .arg(out.path())
        .assert()
        .success()
        .stdout(str_contains(
            "Critical Path: Excavation → Foundation → Structure → Brickwork → Finishing",
        ))
        .stdout(str_contains("Total Project Duration: 145 days"));
}

#[test]
fn missing_input_file_fails() {
    cli()
        .args(["schedule", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(str_contains("failed to load"));
}
