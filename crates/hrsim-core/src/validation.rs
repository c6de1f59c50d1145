use chrono::{Months, NaiveDate};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::record::{EmployeeRecord, SalaryBand};
use crate::taxonomy::EventType;
use crate::{HIRE_WINDOW_YEARS, MAX_AGE_YEARS, MIN_AGE_YEARS};

/// Validate the field invariants of a single record.
///
/// This checks:
/// - the department/position pair exists in the catalog
/// - salary is on-step and inside the band
/// - names are present and the email has a plausible shape
/// - event stamps agree with the attached event type
pub fn validate_record(catalog: &Catalog, band: &SalaryBand, record: &EmployeeRecord) -> Result<()> {
    if !catalog.contains_pair(&record.department, &record.position) {
        return Err(Error::CatalogInconsistency {
            department: record.department.clone(),
            position: record.position.clone(),
        });
    }

    if !band.contains(record.salary) {
        return Err(Error::InvalidRecord(format!(
            "salary {} outside [{}, {}] or not a multiple of {}",
            record.salary, band.min, band.max, band.step
        )));
    }

    if record.first_name.trim().is_empty() || record.last_name.trim().is_empty() {
        return Err(Error::InvalidRecord("name must not be empty".to_string()));
    }

    if !is_email_shaped(&record.email) {
        return Err(Error::InvalidRecord(format!(
            "malformed email: {}",
            record.email
        )));
    }

    match record.event_type {
        None | Some(EventType::Hire) => {
            if record.event_date.is_some() {
                return Err(Error::InvalidRecord(
                    "event_date set without a non-hire event_type; datasets must carry the event_type column alongside event_date".to_string(),
                ));
            }
        }
        Some(kind) => {
            if record.event_date.is_none() {
                return Err(Error::InvalidRecord(format!(
                    "{kind} event without event_date"
                )));
            }
        }
    }

    if record.resignation_date.is_some() && record.event_type != Some(EventType::Resignation) {
        return Err(Error::InvalidRecord(
            "resignation_date requires a resignation event".to_string(),
        ));
    }

    Ok(())
}

/// Validate every record, reporting the index of the first failure.
pub fn validate_records(
    catalog: &Catalog,
    band: &SalaryBand,
    records: &[EmployeeRecord],
) -> Result<()> {
    for (idx, record) in records.iter().enumerate() {
        validate_record(catalog, band, record).map_err(|err| match err {
            Error::InvalidRecord(message) => Error::InvalidRecord(format!("record {idx}: {message}")),
            other => other,
        })?;
    }
    Ok(())
}

/// Validate a freshly generated record, including the age and hire-date
/// windows measured from `today`.
pub fn validate_generated(
    catalog: &Catalog,
    band: &SalaryBand,
    record: &EmployeeRecord,
    today: NaiveDate,
) -> Result<()> {
    validate_record(catalog, band, record)?;

    let age = today.years_since(record.date_of_birth).ok_or_else(|| {
        Error::InvalidRecord(format!(
            "date_of_birth {} is after {today}",
            record.date_of_birth
        ))
    })?;
    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
        return Err(Error::InvalidRecord(format!(
            "age {age} outside [{MIN_AGE_YEARS}, {MAX_AGE_YEARS}]"
        )));
    }

    let earliest_hire = years_before(today, HIRE_WINDOW_YEARS)?;
    if record.hire_date < earliest_hire || record.hire_date > today {
        return Err(Error::InvalidRecord(format!(
            "hire_date {} outside [{earliest_hire}, {today}]",
            record.hire_date
        )));
    }

    Ok(())
}

/// The same calendar day `years` years before `date`, clamped to month end.
pub fn years_before(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(years * 12))
        .ok_or_else(|| Error::InvalidArgument(format!("{years} years before {date} is out of range")))
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_email_shaped("ana.silva@example.com"));
        assert!(!is_email_shaped("ana.silva@example"));
        assert!(!is_email_shaped("@example.com"));
        assert!(!is_email_shaped("a@b@example.com"));
        assert!(!is_email_shaped("ana silva@example.com"));
    }

    #[test]
    fn years_before_clamps_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap_or_default();
        let expected = NaiveDate::from_ymd_opt(2014, 2, 28).unwrap_or_default();
        assert_eq!(years_before(leap, 10).ok(), Some(expected));
    }
}
