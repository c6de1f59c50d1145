use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use hrsim_core::EmployeeRecord;

use crate::errors::GenerationError;

/// Write records as a pretty-printed JSON array of objects.
pub fn write_records_json(path: &Path, records: &[EmployeeRecord]) -> Result<u64, GenerationError> {
    let data = serde_json::to_vec_pretty(records)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(data.len() as u64)
}

/// Read a JSON array of record objects.
pub fn read_records_json(path: &Path) -> Result<Vec<EmployeeRecord>, GenerationError> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<EmployeeRecord> = serde_json::from_reader(reader)?;
    Ok(records)
}
