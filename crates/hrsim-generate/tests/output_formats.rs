mod common;

use std::fs;
use std::path::PathBuf;

use hrsim_core::{EmployeeRecord, EventType, OutputFormat};
use hrsim_generate::{Output, read_records, write_records};

use common::{record, today};

fn stamped_records() -> Vec<EmployeeRecord> {
    let plain = record("Engineering", "Engineer", 60_000);

    let mut promoted = record("Engineering", "Manager", 72_000);
    promoted.first_name = "Katherine".to_string();
    promoted.address = "4 Orbit Rd, \"Hampton\", VA 23666".to_string();
    promoted.event_type = Some(EventType::Promotion);
    promoted.event_date = Some(today());

    let mut resigned = record("Sales", "Rep", 41_000);
    resigned.event_type = Some(EventType::Resignation);
    resigned.event_date = Some(today());
    resigned.resignation_date = Some(today());

    vec![plain, promoted, resigned]
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("hrsim_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn write_and_reload(format: OutputFormat) -> (PathBuf, Vec<EmployeeRecord>) {
    let dir = temp_out_dir(format.as_str());
    let output = write_records(stamped_records(), format, &dir.join("hr_data")).expect("write");
    let Output::Saved { path, bytes } = output else {
        panic!("{format} should be written to disk");
    };
    assert!(bytes > 0);
    assert_eq!(path, dir.join(format!("hr_data.{format}")));
    let reloaded = read_records(&path).expect("read back");
    (path, reloaded)
}

#[test]
fn csv_has_header_and_reloads() {
    let (path, reloaded) = write_and_reload(OutputFormat::Csv);
    assert_eq!(reloaded, stamped_records());

    let contents = fs::read_to_string(&path).expect("read csv");
    let header = contents.lines().next().expect("header line");
    assert_eq!(header, EmployeeRecord::COLUMNS.join(","));
}

#[test]
fn json_omits_absent_event_fields() {
    let (path, reloaded) = write_and_reload(OutputFormat::Json);
    assert_eq!(reloaded, stamped_records());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read json")).expect("parse");
    let rows = value.as_array().expect("array of records");
    assert!(rows[0].get("event_type").is_none());
    assert_eq!(rows[2]["resignation_date"], "2026-10-19");
}

#[test]
fn parquet_reloads() {
    let (_, reloaded) = write_and_reload(OutputFormat::Parquet);
    assert_eq!(reloaded, stamped_records());
}

#[test]
fn message_names_the_file() {
    let dir = temp_out_dir("message");
    let output = write_records(stamped_records(), OutputFormat::Csv, &dir.join("hr_data"))
        .expect("write");
    assert_eq!(
        output.message(),
        format!("Data saved to {}", dir.join("hr_data.csv").display())
    );
}
