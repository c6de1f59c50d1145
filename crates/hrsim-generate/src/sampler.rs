use std::path::PathBuf;

use tracing::debug;

use hrsim_core::EmployeeRecord;

use crate::errors::GenerationError;
use crate::source::RandomSource;

/// Where the records an event is applied to come from.
#[derive(Debug, Clone)]
pub enum Pool {
    /// Generate this many fresh records.
    Generated(usize),
    /// Read a prior dataset (`.csv`, `.json` or `.parquet`).
    Loaded(PathBuf),
    /// Records already in memory.
    Provided(Vec<EmployeeRecord>),
}

/// Draw `sample_size` records uniformly without replacement.
///
/// Fails when the pool is smaller than the sample; a zero sample is empty.
pub fn select(
    pool: &[EmployeeRecord],
    sample_size: usize,
    source: &mut dyn RandomSource,
) -> Result<Vec<EmployeeRecord>, GenerationError> {
    if sample_size > pool.len() {
        return Err(GenerationError::InvalidArgument(format!(
            "sample size {sample_size} exceeds pool size {}",
            pool.len()
        )));
    }

    let selected: Vec<EmployeeRecord> = source
        .sample_indices(pool.len(), sample_size)
        .into_iter()
        .map(|idx| pool[idx].clone())
        .collect();
    debug!(pool = pool.len(), selected = selected.len(), "records sampled");
    Ok(selected)
}
