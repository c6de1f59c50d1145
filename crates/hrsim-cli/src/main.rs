mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hrsim_core::{Catalog, Error as CoreError, EventType, OutputFormat, SalaryBand, UpdateType};
use hrsim_generate::{
    FakeSource, GenerationError, LocaleKey, Output, PolicyPreset, Pool, RunReport,
    SimulationOptions, Simulator, entropy_seed, write_records,
};
use registry::{RunContext, init_run_logging, start_run, write_report};
use settings::{Settings, SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;

/// Records echoed to stdout for `dict` output.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "hrsim", version, about = "Synthetic employee records and lifecycle events")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate fresh employee records.
    Generate(GenerateArgs),
    /// Apply one update kind to records sampled from a pool.
    Update(UpdateArgs),
    /// Apply a drawn (or forced) lifecycle event to a batch of records.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// TOML settings file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of records to generate (pool size when no input is given).
    #[arg(long)]
    count: Option<usize>,
    /// Output format: dict, csv, json or parquet.
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,
    /// Output path without extension.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Locale for names, phones and addresses (en_US or pt_BR).
    #[arg(long)]
    locale: Option<LocaleKey>,
    /// Department/position catalog (.json or .toml).
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
    /// Mutation rules: in-place or batch.
    #[arg(long)]
    policy: Option<PolicyPreset>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD) for event stamps.
    #[arg(long, value_name = "DATE")]
    today: Option<NaiveDate>,
}

impl CommonArgs {
    fn settings(self) -> Result<Settings, CliError> {
        let mut settings = load_settings(self.config.as_deref())?;
        if let Some(count) = self.count {
            settings.count = count;
        }
        if let Some(format) = self.format {
            settings.output_format = format;
        }
        if let Some(output) = self.output {
            settings.output_path = output;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(locale) = self.locale {
            settings.locale = locale;
        }
        if let Some(catalog) = self.catalog {
            settings.catalog = Some(catalog);
        }
        if let Some(policy) = self.policy {
            settings.policy = policy;
        }
        if let Some(run_dir) = self.run_dir {
            settings.run_dir = run_dir;
        }
        if let Some(today) = self.today {
            settings.today = Some(today);
        }
        Ok(settings)
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// promotion, salary_increase, department_change or resignation.
    #[arg(long, visible_alias = "type", value_name = "KIND")]
    type_of_update: Option<UpdateType>,
    /// Number of records to update.
    #[arg(long)]
    update_count: Option<usize>,
    /// Prior dataset (.csv, .json or .parquet) to update instead of a fresh pool.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Records the event applies to; defaults to the pool size.
    #[arg(long)]
    sample: Option<usize>,
    /// Force the event kind instead of drawing it.
    #[arg(long, value_name = "KIND")]
    event: Option<EventType>,
    /// Prior dataset (.csv, .json or .parquet) to sample from.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Generate,
    Update(UpdateType),
    Simulate,
}

impl Task {
    fn as_str(self) -> &'static str {
        match self {
            Task::Generate => "generate",
            Task::Update(_) => "update",
            Task::Simulate => "simulate",
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let settings = args.common.settings()?;
            run(Task::Generate, settings)
        }
        Command::Update(args) => {
            let mut settings = args.common.settings()?;
            if let Some(kind) = args.type_of_update {
                settings.type_of_update = Some(kind);
            }
            if let Some(update_count) = args.update_count {
                settings.update_count = update_count;
            }
            if let Some(input) = args.input {
                settings.input = Some(input);
            }
            let kind = settings.type_of_update.ok_or_else(|| {
                CliError::InvalidConfig(
                    "update needs --type-of-update or type_of_update in the config".to_string(),
                )
            })?;
            run(Task::Update(kind), settings)
        }
        Command::Simulate(args) => {
            let mut settings = args.common.settings()?;
            if let Some(sample) = args.sample {
                settings.sample_size = Some(sample);
            }
            if let Some(event) = args.event {
                settings.event = Some(event);
            }
            if let Some(input) = args.input {
                settings.input = Some(input);
            }
            run(Task::Simulate, settings)
        }
    }
}

fn run(task: Task, settings: Settings) -> Result<(), CliError> {
    let catalog = match &settings.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let today = settings
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let options = SimulationOptions {
        today,
        band: SalaryBand::default(),
        policy: settings.mutation_policy(),
    };
    let simulator = Simulator::new(&catalog, options)?;

    let seed = settings.seed.unwrap_or_else(entropy_seed);
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: task.as_str().to_string(),
        seed,
        settings,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    let settings = run_ctx.settings;
    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = task.as_str(),
        seed,
        locale = %settings.locale,
        today = %today,
        run_root = %run_paths.root.display()
    );
    if settings.seed.is_none() {
        tracing::warn!(seed, "no seed configured; pass --seed {seed} to replay this run");
    }

    let timer = Instant::now();
    let mut source = FakeSource::seeded(seed, settings.locale);
    let mut report = RunReport::new(run_id, task.as_str(), seed, settings.locale.as_str(), today);
    let pool = match &settings.input {
        Some(path) => Pool::Loaded(path.clone()),
        None => Pool::Generated(settings.count),
    };

    let (records, headline) = match task {
        Task::Generate => {
            let records = simulator.generate(settings.count, &mut source)?;
            report.pool_size = records.len() as u64;
            let headline = format!("Generated {} records.", records.len());
            (records, headline)
        }
        Task::Update(kind) => {
            let outcome = simulator.update(pool, kind, settings.update_count, &mut source)?;
            report.pool_size = outcome.pool_size as u64;
            report.event_type = Some(outcome.event_type.to_string());
            let headline = format!("Updated {} records with {kind}.", outcome.records.len());
            (outcome.records, headline)
        }
        Task::Simulate => {
            let sample_size = settings.sample_size;
            let outcome = match settings.event {
                Some(event) => simulator.simulate_with(pool, sample_size, event, &mut source)?,
                None => simulator.simulate(pool, sample_size, &mut source)?,
            };
            report.pool_size = outcome.pool_size as u64;
            report.event_type = Some(outcome.event_type.to_string());
            let headline = format!(
                "Simulated {} for {} records.",
                outcome.event_type,
                outcome.records.len()
            );
            (outcome.records, headline)
        }
    };

    report.record_output(&records);
    report.output_format = settings.output_format;

    let output = write_records(records, settings.output_format, &settings.output_path)?;
    match &output {
        Output::Records(records) => {
            println!("{headline}");
            for record in records.iter().take(PREVIEW_ROWS) {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        Output::Saved { path, bytes } => {
            report.output_path = Some(path.display().to_string());
            report.bytes_written = *bytes;
            if task != Task::Generate {
                println!("{headline}");
            }
            println!("{}", output.message());
        }
    }

    report.duration_ms = timer.elapsed().as_millis() as u64;
    write_report(&run_paths, &report)?;

    tracing::info!(
        event = "run_finished",
        records_out = report.records_out,
        bytes_written = report.bytes_written,
        duration_ms = report.duration_ms,
        report = %run_paths.report_path.display()
    );

    Ok(())
}
