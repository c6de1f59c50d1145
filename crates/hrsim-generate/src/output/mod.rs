//! Rendering and loading of record batches.

pub mod csv;
pub mod json;
pub mod parquet;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use hrsim_core::{EmployeeRecord, OutputFormat};

use crate::errors::GenerationError;

/// Result of dispatching a batch to an output format.
#[derive(Debug, Clone)]
pub enum Output {
    /// `OutputFormat::Dict`: the records themselves.
    Records(Vec<EmployeeRecord>),
    /// File formats: where the batch was written and its size on disk.
    Saved { path: PathBuf, bytes: u64 },
}

impl Output {
    pub fn message(&self) -> String {
        match self {
            Output::Records(records) => format!("Generated {} records.", records.len()),
            Output::Saved { path, .. } => format!("Data saved to {}", path.display()),
        }
    }
}

/// Write `records` in `format`. File formats append the extension to
/// `output_path` (`hr_data` becomes `hr_data.csv`).
pub fn write_records(
    records: Vec<EmployeeRecord>,
    format: OutputFormat,
    output_path: &Path,
) -> Result<Output, GenerationError> {
    let Some(ext) = format.extension() else {
        return Ok(Output::Records(records));
    };

    let path = with_appended_extension(output_path, ext);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let bytes = match format {
        OutputFormat::Csv => csv::write_records_csv(&path, &records)?,
        OutputFormat::Json => json::write_records_json(&path, &records)?,
        OutputFormat::Parquet => parquet::write_records_parquet(&path, &records)?,
        OutputFormat::Dict => 0,
    };

    info!(
        format = %format,
        path = %path.display(),
        records = records.len(),
        bytes,
        "records written"
    );
    Ok(Output::Saved { path, bytes })
}

/// Read a dataset back into records, choosing the reader by extension.
pub fn read_records(path: &Path) -> Result<Vec<EmployeeRecord>, GenerationError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    match OutputFormat::from_extension(ext) {
        Some(OutputFormat::Csv) => csv::read_records_csv(path),
        Some(OutputFormat::Json) => json::read_records_json(path),
        Some(OutputFormat::Parquet) => parquet::read_records_parquet(path),
        _ => Err(GenerationError::InvalidArgument(format!(
            "unsupported dataset extension '{ext}' for {}",
            path.display()
        ))),
    }
}

fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
