//! Record lifecycle engine for hrsim.
//!
//! This crate turns a [`hrsim_core::Catalog`] into batches of synthetic
//! employee records, applies lifecycle events to them and renders the result
//! as CSV, JSON or Parquet.

pub mod errors;
pub mod factory;
pub mod model;
pub mod mutator;
pub mod output;
pub mod sampler;
pub mod simulation;
pub mod source;

pub use errors::GenerationError;
pub use factory::RecordFactory;
pub use model::{RunReport, SimulationOptions};
pub use mutator::{DepartmentChangePolicy, EventMutator, MutationPolicy, PolicyPreset, TransferSalary};
pub use output::{Output, read_records, write_records};
pub use sampler::{Pool, select};
pub use simulation::{SimulationOutcome, Simulator};
pub use source::{FakeSource, LocaleKey, RandomSource, entropy_seed};
