use tracing::info;

use hrsim_core::{Catalog, EmployeeRecord, EventType, UpdateType, validate_records};

use crate::errors::GenerationError;
use crate::factory::RecordFactory;
use crate::model::SimulationOptions;
use crate::mutator::EventMutator;
use crate::output::read_records;
use crate::sampler::{Pool, select};
use crate::source::{RandomSource, pick};

/// Records produced by one event pass.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub event_type: EventType,
    /// Size of the pool the records were drawn from (zero for hires).
    pub pool_size: usize,
    pub records: Vec<EmployeeRecord>,
}

/// Wires the factory, sampler and mutator together.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    catalog: &'a Catalog,
    options: SimulationOptions,
    factory: RecordFactory<'a>,
    mutator: EventMutator<'a>,
}

impl<'a> Simulator<'a> {
    pub fn new(catalog: &'a Catalog, options: SimulationOptions) -> Result<Self, GenerationError> {
        let factory = RecordFactory::new(catalog, options.band, options.today);
        let mutator = EventMutator::new(catalog, options.band, options.policy, options.today)?;
        Ok(Self {
            catalog,
            options,
            factory,
            mutator,
        })
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn factory(&self) -> &RecordFactory<'a> {
        &self.factory
    }

    pub fn mutator(&self) -> &EventMutator<'a> {
        &self.mutator
    }

    /// Base records with no event attached.
    pub fn generate(
        &self,
        count: usize,
        source: &mut dyn RandomSource,
    ) -> Result<Vec<EmployeeRecord>, GenerationError> {
        let records = self.factory.generate(count, source)?;
        info!(count = records.len(), "records generated");
        Ok(records)
    }

    /// Materialize a pool. Loaded and provided records must agree with the catalog.
    pub fn load_pool(
        &self,
        pool: Pool,
        source: &mut dyn RandomSource,
    ) -> Result<Vec<EmployeeRecord>, GenerationError> {
        let records = match pool {
            Pool::Generated(size) => return self.generate(size, source),
            Pool::Loaded(path) => {
                let records = read_records(&path)?;
                info!(path = %path.display(), count = records.len(), "pool loaded");
                records
            }
            Pool::Provided(records) => records,
        };
        validate_records(self.catalog, &self.options.band, &records)?;
        Ok(records)
    }

    /// Apply one update kind to `count` records sampled from the pool.
    pub fn update(
        &self,
        pool: Pool,
        update_type: UpdateType,
        count: usize,
        source: &mut dyn RandomSource,
    ) -> Result<SimulationOutcome, GenerationError> {
        let records = self.load_pool(pool, source)?;
        let pool_size = records.len();
        let selected = select(&records, count, source)?;
        let event_type = EventType::from(update_type);
        let records = self.mutator.apply(selected, event_type, source)?;
        info!(
            event_type = %event_type,
            pool_size,
            updated = records.len(),
            "records updated"
        );
        Ok(SimulationOutcome {
            event_type,
            pool_size,
            records,
        })
    }

    /// Draw one event kind for the whole batch and apply it.
    pub fn simulate(
        &self,
        pool: Pool,
        sample_size: Option<usize>,
        source: &mut dyn RandomSource,
    ) -> Result<SimulationOutcome, GenerationError> {
        let event_type = *pick(source, &EventType::ALL).ok_or_else(|| {
            GenerationError::InvalidArgument("no event types to draw from".to_string())
        })?;
        self.simulate_with(pool, sample_size, event_type, source)
    }

    /// Apply `event_type` to `sample_size` records from the pool, or to every
    /// record when no sample size is given.
    ///
    /// A hire ignores the pool and yields exactly one new record dated today.
    pub fn simulate_with(
        &self,
        pool: Pool,
        sample_size: Option<usize>,
        event_type: EventType,
        source: &mut dyn RandomSource,
    ) -> Result<SimulationOutcome, GenerationError> {
        if event_type == EventType::Hire {
            let hire = self.factory.generate_one(source)?;
            let records = self.mutator.apply(vec![hire], EventType::Hire, source)?;
            info!(event_type = %event_type, "new hire simulated");
            return Ok(SimulationOutcome {
                event_type,
                pool_size: 0,
                records,
            });
        }

        let records = self.load_pool(pool, source)?;
        let pool_size = records.len();
        let selected = match sample_size {
            Some(sample_size) => select(&records, sample_size, source)?,
            None => records,
        };
        let records = self.mutator.apply(selected, event_type, source)?;
        info!(
            event_type = %event_type,
            pool_size,
            affected = records.len(),
            "event simulated"
        );
        Ok(SimulationOutcome {
            event_type,
            pool_size,
            records,
        })
    }
}
