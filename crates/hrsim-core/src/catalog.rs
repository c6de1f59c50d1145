use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Department to ordered positions mapping that constrains every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Catalog {
    departments: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Build a catalog, rejecting empty departments and duplicate positions.
    pub fn new(departments: BTreeMap<String, Vec<String>>) -> Result<Self> {
        let catalog = Self { departments };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// Catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let departments = BUILTIN
            .iter()
            .map(|(department, positions)| {
                (
                    department.to_string(),
                    positions.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();
        Self { departments }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let departments: BTreeMap<String, Vec<String>> = serde_json::from_str(input)
            .map_err(|err| Error::InvalidCatalog(format!("json: {err}")))?;
        Self::new(departments)
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let departments: BTreeMap<String, Vec<String>> = toml::from_str(input)
            .map_err(|err| Error::InvalidCatalog(format!("toml: {err}")))?;
        Self::new(departments)
    }

    /// Load a catalog file, choosing the parser by extension (`.json` or `.toml`).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::InvalidCatalog(format!("cannot read {}: {err}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(Error::InvalidArgument(format!(
                "catalog file must be .json or .toml: {}",
                path.display()
            ))),
        }
    }

    pub fn departments(&self) -> Vec<&str> {
        self.departments.keys().map(String::as_str).collect()
    }

    pub fn positions(&self, department: &str) -> Option<&[String]> {
        self.departments.get(department).map(Vec::as_slice)
    }

    pub fn contains_pair(&self, department: &str, position: &str) -> bool {
        self.positions(department)
            .is_some_and(|positions| positions.iter().any(|p| p == position))
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Validate internal consistency of a catalog.
///
/// This checks:
/// - at least one department exists
/// - department names are not blank
/// - each department lists at least one position, none blank or repeated
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    if catalog.departments.is_empty() {
        return Err(Error::InvalidCatalog(
            "catalog must define at least one department".to_string(),
        ));
    }

    for (department, positions) in &catalog.departments {
        if department.trim().is_empty() {
            return Err(Error::InvalidCatalog(
                "department name must not be blank".to_string(),
            ));
        }
        if positions.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "department '{department}' has no positions"
            )));
        }

        let mut seen = BTreeSet::new();
        for position in positions {
            if position.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "department '{department}' has a blank position"
                )));
            }
            if !seen.insert(position.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate position: {department}.{position}"
                )));
            }
        }
    }

    Ok(())
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &[
            "Software Engineer",
            "Senior Software Engineer",
            "QA Engineer",
            "DevOps Engineer",
            "Engineering Manager",
        ],
    ),
    ("Finance", &["Accountant", "Financial Analyst", "Finance Manager"]),
    ("Human Resources", &["HR Specialist", "Recruiter", "HR Manager"]),
    (
        "Marketing",
        &["Marketing Specialist", "Content Strategist", "Marketing Manager"],
    ),
    (
        "Operations",
        &["Operations Analyst", "Logistics Coordinator", "Operations Manager"],
    ),
    (
        "Sales",
        &["Sales Representative", "Account Executive", "Sales Manager"],
    ),
];
