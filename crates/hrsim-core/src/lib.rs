//! Core contracts for hrsim.
//!
//! This crate defines the employee record shape, the lifecycle taxonomy, the
//! department/position catalog and the validation helpers shared by the
//! generator and the CLI.

pub mod catalog;
pub mod error;
pub mod record;
pub mod taxonomy;
pub mod validation;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use record::{EmployeeRecord, SalaryBand};
pub use taxonomy::{EventType, OutputFormat, UpdateType};
pub use validation::{validate_generated, validate_record, validate_records};

/// Minimum employee age, in years, at generation time.
pub const MIN_AGE_YEARS: u32 = 18;
/// Maximum employee age, in years, at generation time.
pub const MAX_AGE_YEARS: u32 = 65;
/// How far back, in years, a generated hire date may reach.
pub const HIRE_WINDOW_YEARS: u32 = 10;
