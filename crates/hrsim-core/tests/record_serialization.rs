use chrono::NaiveDate;
use hrsim_core::{EmployeeRecord, EventType};
use schemars::schema_for;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn sample_record() -> EmployeeRecord {
    EmployeeRecord {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone_number: "555-0142".to_string(),
        address: "12 Harbor St, Arlington, VA 22201".to_string(),
        date_of_birth: date(1980, 12, 9),
        department: "Engineering".to_string(),
        position: "Engineer".to_string(),
        hire_date: date(2019, 3, 4),
        salary: 98_000,
        event_type: None,
        event_date: None,
        resignation_date: None,
    }
}

#[test]
fn serializes_record_deterministically() {
    let json = serde_json::to_string_pretty(&sample_record()).expect("serialize record");
    let expected = r#"{
  "first_name": "Grace",
  "last_name": "Hopper",
  "email": "grace@example.com",
  "phone_number": "555-0142",
  "address": "12 Harbor St, Arlington, VA 22201",
  "date_of_birth": "1980-12-09",
  "department": "Engineering",
  "position": "Engineer",
  "hire_date": "2019-03-04",
  "salary": 98000
}"#;
    assert_eq!(json, expected);
}

#[test]
fn event_fields_use_snake_case_wire_values() {
    let mut record = sample_record();
    record.event_type = Some(EventType::SalaryIncrease);
    record.event_date = Some(date(2026, 10, 19));

    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["event_type"], "salary_increase");
    assert_eq!(value["event_date"], "2026-10-19");
    assert!(value.get("resignation_date").is_none());

    let parsed: EmployeeRecord = serde_json::from_value(value).expect("parse record");
    assert_eq!(parsed, record);
}

#[test]
fn json_schema_lists_required_fields() {
    let schema = serde_json::to_value(schema_for!(EmployeeRecord)).expect("serialize schema");
    let required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required array")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();

    for column in &EmployeeRecord::COLUMNS[..10] {
        assert!(required.contains(column), "{column} should be required");
    }
    assert!(!required.contains(&"event_type"));
}
