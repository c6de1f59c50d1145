use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hrsim_core::EmployeeRecord;

use crate::errors::GenerationError;

/// Write records as CSV with a header row in `EmployeeRecord::COLUMNS` order.
pub fn write_records_csv(path: &Path, records: &[EmployeeRecord]) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(EmployeeRecord::COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

/// Read a CSV dataset with a header row. Optional columns may be missing or empty.
pub fn read_records_csv(path: &Path) -> Result<Vec<EmployeeRecord>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<EmployeeRecord>() {
        records.push(row?);
    }
    Ok(records)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
