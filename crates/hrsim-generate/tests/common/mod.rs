#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use chrono::NaiveDate;
use hrsim_core::{Catalog, EmployeeRecord};
use hrsim_generate::RandomSource;

/// Source whose choices are scripted by the test; unscripted draws take the
/// first option or the range minimum.
#[derive(Default)]
pub struct ScriptedSource {
    indices: VecDeque<usize>,
    ints: VecDeque<i64>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_ints(mut self, ints: &[i64]) -> Self {
        self.ints.extend(ints);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map(|idx| idx % len).unwrap_or(0)
    }

    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        self.ints
            .pop_front()
            .map(|value| value.clamp(min, max))
            .unwrap_or(min)
    }

    fn first_name(&mut self) -> String {
        "Ada".to_string()
    }

    fn last_name(&mut self) -> String {
        "Lovelace".to_string()
    }

    fn email(&mut self) -> String {
        "ada@example.com".to_string()
    }

    fn phone_number(&mut self) -> String {
        "555-0100".to_string()
    }

    fn address(&mut self) -> String {
        "1 Analytical Way, London, LN 00001".to_string()
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

/// Engineering: Engineer, Manager. Sales: Rep.
pub fn small_catalog() -> Catalog {
    let mut departments = BTreeMap::new();
    departments.insert(
        "Engineering".to_string(),
        vec!["Engineer".to_string(), "Manager".to_string()],
    );
    departments.insert("Sales".to_string(), vec!["Rep".to_string()]);
    Catalog::new(departments).expect("valid catalog")
}

pub fn record(department: &str, position: &str, salary: i64) -> EmployeeRecord {
    EmployeeRecord {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone_number: "555-0199".to_string(),
        address: "12 Harbor St, Arlington, VA 22201".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 12, 9).expect("valid date"),
        department: department.to_string(),
        position: position.to_string(),
        hire_date: NaiveDate::from_ymd_opt(2019, 3, 4).expect("valid date"),
        salary,
        event_type: None,
        event_date: None,
        resignation_date: None,
    }
}

/// Records that differ only by first name, so duplicates are detectable.
pub fn numbered_pool(size: usize) -> Vec<EmployeeRecord> {
    (0..size)
        .map(|idx| {
            let mut record = record("Engineering", "Engineer", 60_000);
            record.first_name = format!("Employee{idx}");
            record
        })
        .collect()
}
