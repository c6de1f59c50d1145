use std::env;
use std::path::PathBuf;

use hrsim_core::{Catalog, OutputFormat};
use hrsim_generate::{
    FakeSource, LocaleKey, Pool, SimulationOptions, Simulator, write_records,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut count = 100_usize;
    let mut seed: Option<u64> = None;
    let mut format = OutputFormat::Json;
    let mut out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => count = args.next().ok_or("missing --count value")?.parse()?,
            "--seed" => seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            "--format" => format = args.next().ok_or("missing --format value")?.parse()?,
            "--out" => out = args.next().map(PathBuf::from),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let catalog = Catalog::builtin();
    let simulator = Simulator::new(&catalog, SimulationOptions::default())?;
    let mut source = match seed {
        Some(seed) => FakeSource::seeded(seed, LocaleKey::EnUs),
        None => FakeSource::from_entropy(LocaleKey::EnUs),
    };
    let outcome = simulator.simulate(Pool::Generated(count), None, &mut source)?;

    let out = out.unwrap_or_else(|| PathBuf::from("hr_events"));
    let output = write_records(outcome.records, format, &out)?;
    println!("event_type={} {}", outcome.event_type, output.message());
    Ok(())
}
