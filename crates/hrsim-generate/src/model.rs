use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hrsim_core::{EmployeeRecord, OutputFormat, SalaryBand};

use crate::mutator::MutationPolicy;

/// Options shared by the factory and the mutator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Date used for event stamps and the age/hire windows.
    pub today: NaiveDate,
    /// Salary bounds for draws and raises.
    pub band: SalaryBand,
    /// Per-event transformation rules.
    pub policy: MutationPolicy,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            today: chrono::Local::now().date_naive(),
            band: SalaryBand::default(),
            policy: MutationPolicy::default(),
        }
    }
}

/// Report for a single CLI run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub command: String,
    pub seed: u64,
    pub locale: String,
    pub today: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    pub pool_size: u64,
    pub records_out: u64,
    pub output_format: OutputFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub bytes_written: u64,
    pub event_counts: BTreeMap<String, u64>,
    pub departments: BTreeMap<String, u64>,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(run_id: String, command: &str, seed: u64, locale: &str, today: NaiveDate) -> Self {
        Self {
            run_id,
            command: command.to_string(),
            seed,
            locale: locale.to_string(),
            today,
            event_type: None,
            pool_size: 0,
            records_out: 0,
            output_format: OutputFormat::Dict,
            output_path: None,
            bytes_written: 0,
            event_counts: BTreeMap::new(),
            departments: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    /// Tally the event stamps and departments of the emitted records.
    pub fn record_output(&mut self, records: &[EmployeeRecord]) {
        self.records_out = records.len() as u64;
        for record in records {
            let kind = record
                .event_type
                .map(|kind| kind.as_str())
                .unwrap_or("none");
            *self.event_counts.entry(kind.to_string()).or_insert(0) += 1;
            *self
                .departments
                .entry(record.department.clone())
                .or_insert(0) += 1;
        }
    }
}
