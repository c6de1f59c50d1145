use chrono::{Duration, NaiveDate};
use tracing::debug;

use hrsim_core::validation::years_before;
use hrsim_core::{
    Catalog, EmployeeRecord, HIRE_WINDOW_YEARS, MAX_AGE_YEARS, MIN_AGE_YEARS, SalaryBand,
};

use crate::errors::GenerationError;
use crate::source::{RandomSource, pick};

/// Builds base employee records from the catalog and a random source.
#[derive(Debug, Clone)]
pub struct RecordFactory<'a> {
    catalog: &'a Catalog,
    band: SalaryBand,
    today: NaiveDate,
}

impl<'a> RecordFactory<'a> {
    pub fn new(catalog: &'a Catalog, band: SalaryBand, today: NaiveDate) -> Self {
        Self {
            catalog,
            band,
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Generate `count` independent records. Zero yields an empty batch.
    pub fn generate(
        &self,
        count: usize,
        source: &mut dyn RandomSource,
    ) -> Result<Vec<EmployeeRecord>, GenerationError> {
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.generate_one(source)?);
        }
        debug!(count, "base records generated");
        Ok(records)
    }

    /// Generate one record with no event stamp.
    pub fn generate_one(
        &self,
        source: &mut dyn RandomSource,
    ) -> Result<EmployeeRecord, GenerationError> {
        // Positions are department-scoped, so the department is drawn first.
        let departments = self.catalog.departments();
        let department = *pick(source, &departments).ok_or_else(|| {
            GenerationError::InvalidArgument("catalog has no departments".to_string())
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

        let first_name = source.first_name();
        let last_name = source.last_name();
        let email = source.email();
        let phone_number = source.phone_number();
        let address = source.address();

        // Oldest allowed birthday is the day after turning MAX_AGE + 1.
        let oldest = years_before(self.today, MAX_AGE_YEARS + 1)? + Duration::days(1);
        let youngest = years_before(self.today, MIN_AGE_YEARS)?;
        let date_of_birth = source.date_between(oldest, youngest);

        let earliest_hire = years_before(self.today, HIRE_WINDOW_YEARS)?;
        let hire_date = source.date_between(earliest_hire, self.today);

        let salary = self.draw_salary(source);

        Ok(EmployeeRecord {
            first_name,
            last_name,
            email,
            phone_number,
            address,
            date_of_birth,
            department: department.to_string(),
            position: position.clone(),
            hire_date,
            salary,
            event_type: None,
            event_date: None,
            resignation_date: None,
        })
    }

    /// Uniform salary in the band, rounded to the nearest step.
    pub fn draw_salary(&self, source: &mut dyn RandomSource) -> i64 {
        let raw = source.int_in_range(self.band.min, self.band.max);
        self.band.clamp(self.band.round(raw as f64))
    }
}
