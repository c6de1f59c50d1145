use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle event attached to an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Hire,
    Resignation,
    Promotion,
    SalaryIncrease,
    DepartmentChange,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Hire,
        EventType::Resignation,
        EventType::Promotion,
        EventType::SalaryIncrease,
        EventType::DepartmentChange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hire => "hire",
            Self::Resignation => "resignation",
            Self::Promotion => "promotion",
            Self::SalaryIncrease => "salary_increase",
            Self::DepartmentChange => "department_change",
        }
    }
}

/// Event kinds that mutate an existing record. Hiring creates one instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Resignation,
    Promotion,
    SalaryIncrease,
    DepartmentChange,
}

impl UpdateType {
    pub const ALL: [UpdateType; 4] = [
        UpdateType::Resignation,
        UpdateType::Promotion,
        UpdateType::SalaryIncrease,
        UpdateType::DepartmentChange,
    ];

    pub fn as_str(self) -> &'static str {
        EventType::from(self).as_str()
    }
}

impl From<UpdateType> for EventType {
    fn from(value: UpdateType) -> Self {
        match value {
            UpdateType::Resignation => EventType::Resignation,
            UpdateType::Promotion => EventType::Promotion,
            UpdateType::SalaryIncrease => EventType::SalaryIncrease,
            UpdateType::DepartmentChange => EventType::DepartmentChange,
        }
    }
}

impl TryFrom<EventType> for UpdateType {
    type Error = Error;

    fn try_from(value: EventType) -> Result<Self> {
        match value {
            EventType::Hire => Err(Error::InvalidArgument(
                "hire is not an update of an existing record".to_string(),
            )),
            EventType::Resignation => Ok(UpdateType::Resignation),
            EventType::Promotion => Ok(UpdateType::Promotion),
            EventType::SalaryIncrease => Ok(UpdateType::SalaryIncrease),
            EventType::DepartmentChange => Ok(UpdateType::DepartmentChange),
        }
    }
}

/// Interchange format for a batch of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Keep the records in memory.
    #[default]
    Dict,
    Csv,
    Parquet,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Dict,
        OutputFormat::Csv,
        OutputFormat::Parquet,
        OutputFormat::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dict => "dict",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Json => "json",
        }
    }

    /// File extension for file-backed formats.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Dict => None,
            other => Some(other.as_str()),
        }
    }

    /// Resolve a format from a file extension (`csv`, `json`, `parquet`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = normalize(value);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown event type '{value}'")))
    }
}

impl FromStr for UpdateType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = normalize(value);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown update type '{value}'")))
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = normalize(value);
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unsupported format '{value}'; choose from dict, csv, parquet, json"
                ))
            })
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds_regardless_of_case_and_separator() {
        assert_eq!(
            "SALARY_INCREASE".parse::<EventType>().ok(),
            Some(EventType::SalaryIncrease)
        );
        assert_eq!(
            "department-change".parse::<UpdateType>().ok(),
            Some(UpdateType::DepartmentChange)
        );
        assert_eq!("Parquet".parse::<OutputFormat>().ok(), Some(OutputFormat::Parquet));
    }

    #[test]
    fn rejects_unknown_kinds() {
        assert!(matches!(
            "layoff".parse::<EventType>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            "hire".parse::<UpdateType>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn hire_is_not_an_update() {
        assert!(UpdateType::try_from(EventType::Hire).is_err());
        for kind in UpdateType::ALL {
            let event = EventType::from(kind);
            assert_eq!(UpdateType::try_from(event).ok(), Some(kind));
        }
    }
}
