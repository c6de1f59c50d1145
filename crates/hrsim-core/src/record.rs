use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::taxonomy::EventType;

/// Date format used by every interchange format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One synthetic employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmployeeRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub department: String,
    /// Always one of the catalog positions for `department`.
    pub position: String,
    pub hire_date: NaiveDate,
    /// Multiple of the salary step, inside the salary band.
    pub salary: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resignation_date: Option<NaiveDate>,
}

impl EmployeeRecord {
    /// Column order for tabular formats.
    pub const COLUMNS: [&'static str; 13] = [
        "first_name",
        "last_name",
        "email",
        "phone_number",
        "address",
        "date_of_birth",
        "department",
        "position",
        "hire_date",
        "salary",
        "event_type",
        "event_date",
        "resignation_date",
    ];

    /// Render the record as text cells in [`Self::COLUMNS`] order.
    ///
    /// Absent optional fields become empty cells.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone_number.clone(),
            self.address.clone(),
            format_date(self.date_of_birth),
            self.department.clone(),
            self.position.clone(),
            format_date(self.hire_date),
            self.salary.to_string(),
            self.event_type
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            self.event_date.map(format_date).unwrap_or_default(),
            self.resignation_date.map(format_date).unwrap_or_default(),
        ]
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Salary bounds and granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalaryBand {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl Default for SalaryBand {
    fn default() -> Self {
        Self {
            min: 35_000,
            max: 120_000,
            step: 1_000,
        }
    }
}

impl SalaryBand {
    /// Round to the nearest step; exact halves go to the even step.
    pub fn round(&self, value: f64) -> i64 {
        let step = self.step as f64;
        (value / step).round_ties_even() as i64 * self.step
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Apply a raise multiplier, rounding to a step and capping at the band.
    pub fn raise(&self, salary: i64, multiplier: f64) -> i64 {
        self.clamp(self.round(salary as f64 * multiplier))
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max && value % self.step == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_thousand() {
        let band = SalaryBand::default();
        assert_eq!(band.round(35_499.0), 35_000);
        assert_eq!(band.round(35_501.0), 36_000);
        assert_eq!(band.round(36_500.0), 36_000);
        assert_eq!(band.round(37_500.0), 38_000);
    }

    #[test]
    fn raise_is_capped_by_the_band() {
        let band = SalaryBand::default();
        assert_eq!(band.raise(50_000, 1.1), 55_000);
        assert_eq!(band.raise(35_000, 1.05), 37_000);
        assert_eq!(band.raise(118_000, 1.1), 120_000);
        assert!(band.contains(band.raise(120_000, 1.2)));
    }

    #[test]
    fn row_leaves_absent_fields_empty() {
        let record = EmployeeRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            address: "1 Analytical Way".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap_or_default(),
            department: "Engineering".to_string(),
            position: "Engineer".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap_or_default(),
            salary: 90_000,
            event_type: None,
            event_date: None,
            resignation_date: None,
        };
        let row = record.to_row();
        assert_eq!(row.len(), EmployeeRecord::COLUMNS.len());
        assert_eq!(row[5], "1990-12-10");
        assert_eq!(row[9], "90000");
        assert!(row[10..].iter().all(String::is_empty));
    }
}
