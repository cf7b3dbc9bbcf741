#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use oligosim_lib::logging::format_duration;
use oligosim_lib::pipeline::{self, MutatorChains, PipelineConfig};
use oligosim_lib::rng::create_rng;
use oligosim_lib::scenarios::{sequencing_chain, Scenario};
use oligosim_lib::seqio::WriteMode;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// The named challenge to simulate.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum Challenge {
    /// Electrochemical synthesis followed by long-term decay
    Decay,
    /// Photolithographic synthesis
    Photolithography,
}

/// Output file format for the read files.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Txt,
    Fasta,
    Fastq,
}

impl From<OutputFormat> for WriteMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Txt => WriteMode::Text,
            OutputFormat::Fasta => WriteMode::Fasta,
            OutputFormat::Fastq => WriteMode::Fastq,
        }
    }
}

/// Simulate the error channel of a DNA data storage experiment, producing
/// paired-end sequencing reads from a pool of design sequences.
#[derive(Parser, Debug)]
#[command(name = "oligosim", version, styles = STYLES)]
struct Args {
    /// Name of the challenge to run
    #[arg(value_enum)]
    challenge: Challenge,

    /// Path to the input file (as text, fasta, or fastq)
    input_file: PathBuf,

    /// Path to the output file for sequencing read 1
    output_file_r1: PathBuf,

    /// Path to the output file for sequencing read 2
    output_file_r2: PathBuf,

    /// Enforce the default settings of the challenge
    #[arg(long)]
    strict: bool,

    /// Path to the intermediate file, default will create a temporary file
    #[arg(short = 'i', long = "intermediate_file")]
    intermediate_file: Option<PathBuf>,

    /// Format of the output files
    #[arg(short = 'f', long, value_enum, default_value = "txt")]
    format: OutputFormat,

    /// Coverage bias during synthesis, expressed as the standard deviation
    /// of the lognormal distribution
    #[arg(short = 'b', long = "coverage_bias")]
    coverage_bias: Option<f64>,

    /// Mean physical coverage of the pool, expressed in oligos per design
    /// sequence
    #[arg(short = 'p', long = "physical_redundancy")]
    physical_redundancy: Option<f64>,

    /// Mean sequencing coverage of the pool, expressed in reads per design
    /// sequence
    #[arg(short = 's', long = "sequencing_depth")]
    sequencing_depth: Option<f64>,

    /// Length of the sequencing reads, expressed in nucleotides
    #[arg(short = 'l', long = "read_length")]
    read_length: Option<usize>,

    /// Seed for the random number generator, default is to use the current
    /// time
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the adapter sequences in the output files
    #[arg(long = "no_adapter")]
    no_adapter: bool,

    /// Disable the padding and trimming of the sequences in the output
    /// files
    #[arg(long = "no_padtrim")]
    no_padtrim: bool,
}

fn run(args: &Args) -> Result<()> {
    let start = Instant::now();

    let mut scenario = match args.challenge {
        Challenge::Decay => Scenario::decay()?,
        Challenge::Photolithography => Scenario::photolithography()?,
    };
    let mut add_adapters = true;
    let mut pad_and_trim = true;

    if args.strict {
        warn!("Running in strict mode, challenge definition will be enforced and other parameters ignored.");
    } else {
        warn!("Not running in strict mode, settings can be overridden from challenge definition.");
        if let Some(bias) = args.coverage_bias {
            scenario.coverage_bias = bias;
            warn!("Coverage bias changed from default to {bias}");
        }
        if let Some(redundancy) = args.physical_redundancy {
            scenario.physical_coverage = redundancy;
            warn!("Physical coverage changed from default to {redundancy}");
        }
        if let Some(depth) = args.sequencing_depth {
            scenario.sequencing_coverage = depth;
            warn!("Sequencing coverage changed from default to {depth}");
        }
        if let Some(read_length) = args.read_length {
            scenario.read_length = read_length;
            warn!("Read length changed from default to {read_length}");
        }
        if args.no_adapter {
            add_adapters = false;
            warn!("Adapters will not be added to the output files");
        }
        if args.no_padtrim {
            pad_and_trim = false;
            warn!("Padding and trimming will not be applied to the output files");
        }
    }

    // the seed is not a challenge parameter, so it is honored in strict mode
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
    });
    if args.seed.is_some() {
        warn!("Used custom seed {seed}");
    }
    let mut rng = create_rng(Some(seed));

    let sequencing = sequencing_chain(add_adapters, pad_and_trim, scenario.read_length)?;

    let intermediate = match &args.intermediate_file {
        Some(path) => {
            info!("Using intermediate file at {}", path.display());
            path.clone()
        }
        None => {
            let (file, path) = tempfile::Builder::new()
                .prefix("oligosim-")
                .suffix(".pool")
                .tempfile()
                .context("Failed to create intermediate file")?
                .keep()
                .context("Failed to persist intermediate file")?;
            drop(file);
            path
        }
    };

    let config = PipelineConfig {
        input: args.input_file.clone(),
        intermediate,
        output_r1: args.output_file_r1.clone(),
        output_r2: args.output_file_r2.clone(),
        coverage_bias: scenario.coverage_bias,
        physical_coverage: scenario.physical_coverage,
        sequencing_coverage: scenario.sequencing_coverage,
        format: args.format.into(),
    };
    let chains = MutatorChains {
        initial: scenario.initial_mutators,
        recovery: scenario.recovery_mutators,
        sequencing,
    };

    pipeline::run(&config, &chains, &mut rng)?;

    info!("Finished in {}", format_duration(start.elapsed()));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let _ = e.print();
            std::process::exit(1);
        }
    };

    info!("Running oligosim version {}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = run(&args) {
        error!("{e:#}");
        std::process::exit(2);
    }
}
