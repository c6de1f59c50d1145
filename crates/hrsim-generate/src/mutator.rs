use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use hrsim_core::{Catalog, EmployeeRecord, EventType, SalaryBand, validate_record};

use crate::errors::GenerationError;
use crate::source::{RandomSource, pick};

/// How the salary moves when an employee changes department.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferSalary {
    /// Raise by the multiplier, rounded to the salary step.
    Multiply(f64),
    /// Draw a fresh salary from the band.
    Reroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentChangePolicy {
    /// Draw the new department from every department except the current one.
    pub exclude_current: bool,
    pub salary: TransferSalary,
}

/// Per-event transformation rules applied by [`EventMutator`].
///
/// The default is [`MutationPolicy::in_place`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationPolicy {
    pub promotion_multiplier: f64,
    pub salary_increase_multiplier: f64,
    /// Move a promoted employee to another position in the same department.
    pub reassign_position_on_promotion: bool,
    /// Stamp `resignation_date` alongside `event_date` on resignation.
    pub stamp_resignation_date: bool,
    pub department_change: DepartmentChangePolicy,
}

impl MutationPolicy {
    /// Updates applied to records already in a dataset: +10% promotion with a
    /// new position, +5% salary increase, +10% transfer to another department.
    pub fn in_place() -> Self {
        Self {
            promotion_multiplier: 1.10,
            salary_increase_multiplier: 1.05,
            reassign_position_on_promotion: true,
            stamp_resignation_date: true,
            department_change: DepartmentChangePolicy {
                exclude_current: true,
                salary: TransferSalary::Multiply(1.10),
            },
        }
    }

    /// Whole-batch event simulation: +20% promotion in place, +10% salary
    /// increase, transfer to any department with a re-rolled salary.
    pub fn batch() -> Self {
        Self {
            promotion_multiplier: 1.20,
            salary_increase_multiplier: 1.10,
            reassign_position_on_promotion: false,
            stamp_resignation_date: false,
            department_change: DepartmentChangePolicy {
                exclude_current: false,
                salary: TransferSalary::Reroll,
            },
        }
    }

    /// Raises must strictly increase every salary in `band`, so each raise
    /// multiplier has to lift the band minimum by at least one step.
    /// Transfers must not cut pay.
    pub fn validate(&self, band: &SalaryBand) -> Result<(), GenerationError> {
        check_raise(band, "promotion_multiplier", self.promotion_multiplier)?;
        check_raise(
            band,
            "salary_increase_multiplier",
            self.salary_increase_multiplier,
        )?;
        if let TransferSalary::Multiply(multiplier) = self.department_change.salary {
            if !(multiplier.is_finite() && multiplier >= 1.0) {
                return Err(GenerationError::InvalidArgument(format!(
                    "department_change.salary multiplier must be >= 1.0, got {multiplier}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self::in_place()
    }
}

fn check_raise(band: &SalaryBand, name: &str, value: f64) -> Result<(), GenerationError> {
    // On-grid salaries above the minimum gain more than the minimum does.
    if value.is_finite() && value > 1.0 && band.round(band.min as f64 * value) > band.min {
        return Ok(());
    }
    Err(GenerationError::InvalidArgument(format!(
        "{name} must lift {} by at least one {} step, got {value}",
        band.min, band.step
    )))
}

/// Named policy presets selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyPreset {
    #[default]
    InPlace,
    Batch,
}

impl PolicyPreset {
    pub fn policy(self) -> MutationPolicy {
        match self {
            Self::InPlace => MutationPolicy::in_place(),
            Self::Batch => MutationPolicy::batch(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InPlace => "in_place",
            Self::Batch => "batch",
        }
    }
}

impl FromStr for PolicyPreset {
    type Err = hrsim_core::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_place" => Ok(Self::InPlace),
            "batch" => Ok(Self::Batch),
            _ => Err(hrsim_core::Error::InvalidArgument(format!(
                "unknown policy preset '{value}'; choose in-place or batch"
            ))),
        }
    }
}

impl fmt::Display for PolicyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies lifecycle events to records according to a [`MutationPolicy`].
#[derive(Debug, Clone)]
pub struct EventMutator<'a> {
    catalog: &'a Catalog,
    band: SalaryBand,
    policy: MutationPolicy,
    today: NaiveDate,
}

impl<'a> EventMutator<'a> {
    pub fn new(
        catalog: &'a Catalog,
        band: SalaryBand,
        policy: MutationPolicy,
        today: NaiveDate,
    ) -> Result<Self, GenerationError> {
        policy.validate(&band)?;
        Ok(Self {
            catalog,
            band,
            policy,
            today,
        })
    }

    pub fn policy(&self) -> &MutationPolicy {
        &self.policy
    }

    /// Apply `kind` to every record. All records are stamped, or none are
    /// returned at all.
    pub fn apply(
        &self,
        mut records: Vec<EmployeeRecord>,
        kind: EventType,
        source: &mut dyn RandomSource,
    ) -> Result<Vec<EmployeeRecord>, GenerationError> {
        for record in &mut records {
            self.apply_one(record, kind, source)?;
        }
        debug!(event_type = %kind, count = records.len(), "event applied");
        Ok(records)
    }

    /// Apply `kind` to one record in place.
    ///
    /// Any stamps from an earlier event are cleared, so the record leaves
    /// with exactly one event attached. On error the record is untouched.
    pub fn apply_one(
        &self,
        record: &mut EmployeeRecord,
        kind: EventType,
        source: &mut dyn RandomSource,
    ) -> Result<(), GenerationError> {
        let mut updated = record.clone();
        self.stamp(&mut updated, kind, source)?;
        *record = updated;
        Ok(())
    }

    fn stamp(
        &self,
        record: &mut EmployeeRecord,
        kind: EventType,
        source: &mut dyn RandomSource,
    ) -> Result<(), GenerationError> {
        if !self
            .catalog
            .contains_pair(&record.department, &record.position)
        {
            return Err(hrsim_core::Error::CatalogInconsistency {
                department: record.department.clone(),
                position: record.position.clone(),
            }
            .into());
        }

        record.event_date = None;
        record.resignation_date = None;
        record.event_type = Some(kind);

        match kind {
            EventType::Hire => {
                record.hire_date = self.today;
            }
            EventType::Resignation => {
                record.event_date = Some(self.today);
                if self.policy.stamp_resignation_date {
                    record.resignation_date = Some(self.today);
                }
            }
            EventType::Promotion => {
                if self.policy.reassign_position_on_promotion {
                    self.reassign_position(record, source);
                }
                record.salary = self
                    .band
                    .raise(record.salary, self.policy.promotion_multiplier);
                record.event_date = Some(self.today);
            }
            EventType::SalaryIncrease => {
                record.salary = self
                    .band
                    .raise(record.salary, self.policy.salary_increase_multiplier);
                record.event_date = Some(self.today);
            }
            EventType::DepartmentChange => {
                self.change_department(record, source)?;
                record.event_date = Some(self.today);
            }
        }

        validate_record(self.catalog, &self.band, record)?;
        Ok(())
    }

    fn reassign_position(&self, record: &mut EmployeeRecord, source: &mut dyn RandomSource) {
        let Some(positions) = self.catalog.positions(&record.department) else {
            return;
        };
        let others: Vec<&String> = positions
            .iter()
            .filter(|position| **position != record.position)
            .collect();
        // Single-position departments keep the title and only get the raise.
        if let Some(position) = pick(source, &others) {
            record.position = (*position).clone();
        }
    }

    fn change_department(
        &self,
        record: &mut EmployeeRecord,
        source: &mut dyn RandomSource,
    ) -> Result<(), GenerationError> {
        let rule = self.policy.department_change;
        let candidates: Vec<&str> = self
            .catalog
            .departments()
            .into_iter()
            .filter(|department| !rule.exclude_current || *department != record.department)
            .collect();

        let department = *pick(source, &candidates).ok_or_else(|| {
            GenerationError::InvalidArgument(format!(
                "no department to move '{}' to",
                record.department
            ))
        })?;
        let position = self
            .catalog
            .positions(department)
            .and_then(|positions| pick(source, positions))
            .ok_or_else(|| {
                GenerationError::InvalidArgument(format!(
                    "department '{department}' has no positions"
                ))
            })?;

        record.department = department.to_string();
        record.position = position.clone();
        record.salary = match rule.salary {
            TransferSalary::Multiply(multiplier) => self.band.raise(record.salary, multiplier),
            TransferSalary::Reroll => {
                let raw = source.int_in_range(self.band.min, self.band.max);
                self.band.clamp(self.band.round(raw as f64))
            }
        };
        Ok(())
    }
}
