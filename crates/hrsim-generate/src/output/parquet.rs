use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::Int64Type;
use arrow_array::{Array, ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use hrsim_core::record::{DATE_FORMAT, format_date};
use hrsim_core::{EmployeeRecord, EventType};

use crate::errors::GenerationError;

/// Arrow schema for record batches. Dates are ISO-8601 strings.
pub fn record_schema() -> SchemaRef {
    let fields: Vec<Field> = EmployeeRecord::COLUMNS
        .iter()
        .map(|name| match *name {
            "salary" => Field::new(*name, DataType::Int64, false),
            "event_type" | "event_date" | "resignation_date" => {
                Field::new(*name, DataType::Utf8, true)
            }
            _ => Field::new(*name, DataType::Utf8, false),
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Write records as a single-row-group Parquet file.
pub fn write_records_parquet(
    path: &Path,
    records: &[EmployeeRecord],
) -> Result<u64, GenerationError> {
    let schema = record_schema();
    let batch = to_record_batch(&schema, records)?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, Arc::clone(&schema), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(std::fs::metadata(path)?.len())
}

fn to_record_batch(
    schema: &SchemaRef,
    records: &[EmployeeRecord],
) -> Result<RecordBatch, GenerationError> {
    fn text<F>(records: &[EmployeeRecord], field: F) -> ArrayRef
    where
        F: Fn(&EmployeeRecord) -> String,
    {
        Arc::new(StringArray::from_iter_values(records.iter().map(field)))
    }

    fn optional<F>(records: &[EmployeeRecord], field: F) -> ArrayRef
    where
        F: Fn(&EmployeeRecord) -> Option<String>,
    {
        Arc::new(records.iter().map(field).collect::<StringArray>())
    }

    let columns: Vec<ArrayRef> = vec![
        text(records, |r| r.first_name.clone()),
        text(records, |r| r.last_name.clone()),
        text(records, |r| r.email.clone()),
        text(records, |r| r.phone_number.clone()),
        text(records, |r| r.address.clone()),
        text(records, |r| format_date(r.date_of_birth)),
        text(records, |r| r.department.clone()),
        text(records, |r| r.position.clone()),
        text(records, |r| format_date(r.hire_date)),
        Arc::new(Int64Array::from_iter_values(
            records.iter().map(|r| r.salary),
        )),
        optional(records, |r| r.event_type.map(|kind| kind.as_str().to_string())),
        optional(records, |r| r.event_date.map(format_date)),
        optional(records, |r| r.resignation_date.map(format_date)),
    ];

    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Read every row group of a Parquet dataset into records.
pub fn read_records_parquet(path: &Path) -> Result<Vec<EmployeeRecord>, GenerationError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let columns = BatchColumns::new(&batch)?;
        for row in 0..batch.num_rows() {
            records.push(columns.record(row)?);
        }
    }
    Ok(records)
}

struct BatchColumns<'a> {
    text: Vec<Option<&'a dyn Array>>,
    salary: &'a Int64Array,
}

impl<'a> BatchColumns<'a> {
    fn new(batch: &'a RecordBatch) -> Result<Self, GenerationError> {
        let text = EmployeeRecord::COLUMNS
            .iter()
            .map(|name| batch.column_by_name(name).map(|col| col.as_ref()))
            .collect();
        let salary = batch
            .column_by_name("salary")
            .and_then(|col| col.as_primitive_opt::<Int64Type>())
            .ok_or_else(|| {
                GenerationError::InvalidArgument("parquet column 'salary' must be int64".to_string())
            })?;
        Ok(Self { text, salary })
    }

    fn cell(&self, column: usize, row: usize) -> Result<Option<String>, GenerationError> {
        let Some(array) = self.text.get(column).copied().flatten() else {
            return Ok(None);
        };
        if array.is_null(row) {
            return Ok(None);
        }
        let value = match array.data_type() {
            DataType::Utf8 => array.as_string::<i32>().value(row).to_string(),
            DataType::LargeUtf8 => array.as_string::<i64>().value(row).to_string(),
            DataType::Utf8View => array.as_string_view().value(row).to_string(),
            other => {
                return Err(GenerationError::InvalidArgument(format!(
                    "parquet column '{}' has unsupported type {other}",
                    EmployeeRecord::COLUMNS[column]
                )));
            }
        };
        Ok(Some(value))
    }

    fn required(&self, column: usize, row: usize) -> Result<String, GenerationError> {
        self.cell(column, row)?.ok_or_else(|| {
            GenerationError::InvalidArgument(format!(
                "row {row}: missing value for '{}'",
                EmployeeRecord::COLUMNS[column]
            ))
        })
    }

    fn date(&self, column: usize, row: usize) -> Result<Option<NaiveDate>, GenerationError> {
        self.cell(column, row)?
            .filter(|value| !value.is_empty())
            .map(|value| {
                NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|err| {
                    GenerationError::InvalidArgument(format!(
                        "row {row}: bad date '{value}' in '{}': {err}",
                        EmployeeRecord::COLUMNS[column]
                    ))
                })
            })
            .transpose()
    }

    fn required_date(&self, column: usize, row: usize) -> Result<NaiveDate, GenerationError> {
        self.date(column, row)?.ok_or_else(|| {
            GenerationError::InvalidArgument(format!(
                "row {row}: missing value for '{}'",
                EmployeeRecord::COLUMNS[column]
            ))
        })
    }

    fn record(&self, row: usize) -> Result<EmployeeRecord, GenerationError> {
        if self.salary.is_null(row) {
            return Err(GenerationError::InvalidArgument(format!(
                "row {row}: missing salary"
            )));
        }
        let event_type = self
            .cell(10, row)?
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<EventType>())
            .transpose()?;

        Ok(EmployeeRecord {
            first_name: self.required(0, row)?,
            last_name: self.required(1, row)?,
            email: self.required(2, row)?,
            phone_number: self.required(3, row)?,
            address: self.required(4, row)?,
            date_of_birth: self.required_date(5, row)?,
            department: self.required(6, row)?,
            position: self.required(7, row)?,
            hire_date: self.required_date(8, row)?,
            salary: self.salary.value(row),
            event_type,
            event_date: self.date(11, row)?,
            resignation_date: self.date(12, row)?,
        })
    }
}
