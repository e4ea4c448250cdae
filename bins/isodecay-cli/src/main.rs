//! isodecay: command-line front end for isotope abundance tables.
//!
//! Reads per-sample materials from JSON, runs one table operation, and
//! writes the result as JSON on stdout. Logs go to stderr.
//!
//! Sample files are either a list of materials (`[{"Ni56": 1.0}, ...]`,
//! columns indexed 0..N) or an object of named materials
//! (`{"core": {"Ni56": 1.0}, ...}`, columns in key order).

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use isodecay_core::abundance::{AbundanceTable, SampleId};
use isodecay_core::config::{DecayConfig, NegativeElapsedPolicy, ZeroSumPolicy};
use isodecay_core::constants::ELEMENT_SYMBOLS;
use isodecay_core::element::ElementTable;
use isodecay_core::material::Material;
use isodecay_core::nuclide::atomic_number_of;
use isodecay_core::traits::DecayEngine;
use isodecay_core::units::{TargetTime, TimeQuantity};
use isodecay_engine::{HalfLifeEngine, HalfLifeTable, StableEngine};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Isotope abundance tables through time.
#[derive(Parser, Debug)]
#[command(name = "isodecay", version, about = "Isotope abundance tables through time")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ISODECAY_LOG", default_value = "warn", global = true)]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, env = "ISODECAY_LOG_FORMAT", default_value = "text", global = true)]
    log_format: String,

    /// JSON file with table settings (bare time unit, negative-time and
    /// zero-sum policies, row sorting).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize sample keys and zero-fill: print the table as materials.
    Convert(TableArgs),
    /// Advance every sample to a target time.
    Decay(DecayArgs),
    /// Sum isotopes per element.
    Atoms(TableArgs),
    /// Add element abundances to the element view, optionally normalized.
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Samples JSON file, or `-` for stdin.
    #[arg(short, long)]
    input: PathBuf,

    /// Reference time of the input samples, e.g. "3 d" (default 0 d).
    #[arg(long)]
    time_0: Option<TimeQuantity>,

    /// Print a fixed-width text table instead of JSON.
    #[arg(long)]
    text: bool,
}

#[derive(Args, Debug)]
struct DecayArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Target time, e.g. "30 d" or "1.5 y". A bare number uses the configured
    /// bare unit (days by default).
    #[arg(long)]
    to: TargetTime,

    /// Half-life JSON added on top of the built-in table.
    #[arg(long, conflicts_with = "stable")]
    half_lives: Option<PathBuf>,

    /// Treat every nuclide as stable.
    #[arg(long)]
    stable: bool,

    /// Allow a target time before `time_0`.
    #[arg(long)]
    allow_backward: bool,
}

#[derive(Args, Debug)]
struct MergeArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Element abundances JSON, keyed by element symbol, in the same list or
    /// named layout as the samples file.
    #[arg(long)]
    other: PathBuf,

    /// Scale every sample to unit sum.
    #[arg(long)]
    normalize: bool,

    /// Emit NaN for zero-sum samples instead of failing.
    #[arg(long)]
    nan_on_zero: bool,
}

/// Samples as read from JSON: positional or named.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Samples<T> {
    Listed(Vec<T>),
    Named(BTreeMap<String, T>),
}

impl<T> Samples<T> {
    fn into_labeled(self) -> (Vec<SampleId>, Vec<T>) {
        match self {
            Self::Listed(items) => ((0..items.len()).map(SampleId::Index).collect(), items),
            Self::Named(items) => items
                .into_iter()
                .map(|(name, item)| (SampleId::Name(name), item))
                .unzip(),
        }
    }
}

#[derive(Serialize, Debug)]
struct SampleOutput<T> {
    id: SampleId,
    values: T,
}

#[derive(Serialize, Debug)]
struct TableOutput {
    time_0: TimeQuantity,
    samples: Vec<SampleOutput<Material>>,
}

#[derive(Serialize, Debug)]
struct ElementOutput {
    samples: Vec<SampleOutput<BTreeMap<String, f64>>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "loaded settings");

    match cli.command {
        Commands::Convert(args) => convert(args),
        Commands::Decay(args) => decay(args, config),
        Commands::Atoms(args) => atoms(args),
        Commands::Merge(args) => merge(args, config),
    }
}

fn convert(args: TableArgs) -> Result<()> {
    let table = load_table(&args)?;
    emit_table(&table, args.text)
}

fn decay(args: DecayArgs, mut config: DecayConfig) -> Result<()> {
    let table = load_table(&args.table)?;
    if args.allow_backward {
        config.negative_elapsed = NegativeElapsedPolicy::PassThrough;
    }

    let engine = build_engine(&args)?;
    info!(engine = engine.name(), "selected decay engine");

    let decayed = table
        .decay_with(engine.as_ref(), args.to, &config)
        .context("Failed to decay table")?;
    emit_table(&decayed, args.table.text)
}

fn atoms(args: TableArgs) -> Result<()> {
    let table = load_table(&args)?;
    emit_elements(&table.as_atoms(), args.text)
}

fn merge(args: MergeArgs, mut config: DecayConfig) -> Result<()> {
    let table = load_table(&args.table)?;
    let other = load_elements(&args.other)?;
    if args.nan_on_zero {
        config.zero_sum = ZeroSumPolicy::NonFinite;
    }

    let merged = table
        .merge_with(&other, args.normalize, &config)
        .context("Failed to merge element tables")?;
    emit_elements(&merged, args.table.text)
}

fn build_engine(args: &DecayArgs) -> Result<Box<dyn DecayEngine>> {
    if args.stable {
        return Ok(Box::new(StableEngine::new()));
    }

    let mut half_lives = HalfLifeTable::common();
    if let Some(path) = &args.half_lives {
        let extra = HalfLifeTable::from_path(path)
            .with_context(|| format!("Failed to load half-lives from {}", path.display()))?;
        debug!(entries = extra.len(), "loaded half-lives");
        half_lives.extend(extra);
    }
    Ok(Box::new(
        HalfLifeEngine::new(half_lives).allow_backward(args.allow_backward),
    ))
}

fn load_config(path: Option<&Path>) -> Result<DecayConfig> {
    match path {
        Some(path) => read_json(path),
        None => Ok(DecayConfig::default()),
    }
}

fn load_table(args: &TableArgs) -> Result<AbundanceTable> {
    let samples: Samples<Material> = read_json(&args.input)?;
    let (ids, materials) = samples.into_labeled();
    let time_0 = args.time_0.unwrap_or(TimeQuantity::ZERO);

    let table = AbundanceTable::from_labeled_materials(ids, &materials, time_0)
        .with_context(|| format!("Invalid samples in {}", args.input.display()))?;
    info!(
        samples = table.n_samples(),
        nuclides = table.len(),
        %time_0,
        "loaded abundance table"
    );
    Ok(table)
}

fn load_elements(path: &Path) -> Result<ElementTable> {
    let samples: Samples<BTreeMap<String, f64>> = read_json(path)?;
    let (ids, entries) = samples.into_labeled();

    let mut cells = Vec::new();
    for (id, entry) in ids.into_iter().zip(entries) {
        for (symbol, value) in entry {
            let z = atomic_number_of(&symbol)
                .with_context(|| format!("Unknown element {symbol:?} in {}", path.display()))?;
            cells.push((z, id.clone(), value));
        }
    }
    ElementTable::from_cells(cells)
        .with_context(|| format!("Invalid element abundances in {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn table_output(table: &AbundanceTable) -> TableOutput {
    TableOutput {
        time_0: table.time_0(),
        samples: table
            .samples()
            .iter()
            .cloned()
            .zip(table.to_materials())
            .map(|(id, values)| SampleOutput { id, values })
            .collect(),
    }
}

fn element_output(table: &ElementTable) -> ElementOutput {
    let samples = table
        .samples()
        .iter()
        .map(|id| {
            let values = table
                .elements()
                .iter()
                .map(|&z| {
                    let value = table.get(z, id).unwrap_or(0.0);
                    (ELEMENT_SYMBOLS[z as usize].to_string(), value)
                })
                .collect();
            SampleOutput {
                id: id.clone(),
                values,
            }
        })
        .collect();
    ElementOutput { samples }
}

fn emit_table(table: &AbundanceTable, text: bool) -> Result<()> {
    if text {
        print!("{table}");
    } else {
        println!("{}", serde_json::to_string_pretty(&table_output(table))?);
    }
    Ok(())
}

fn emit_elements(table: &ElementTable, text: bool) -> Result<()> {
    if text {
        print!("{table}");
    } else {
        println!("{}", serde_json::to_string_pretty(&element_output(table))?);
    }
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` overrides `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
