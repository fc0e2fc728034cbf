mod harness;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use kereta_core::{DEFAULT_TRAIN_SPEED_MPS, FeedConfig};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use harness::{RunConfig, run_simulation};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable console summary
    Console,
    /// Machine-readable JSON report
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "kereta-sim", version)]
#[command(about = "Headless journey simulator for the Kereta tour engine")]
struct Args {
    /// Session seed; identical seeds replay identical runs
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Use the discrete demo stepper instead of the continuous simulator
    #[arg(long)]
    demo: bool,

    /// Train speed in m/s (continuous simulator)
    #[arg(long, default_value_t = DEFAULT_TRAIN_SPEED_MPS)]
    speed_mps: f64,

    /// Demo cadence multiplier (stepper mode)
    #[arg(long, default_value_t = 4.0)]
    speed_multiplier: f64,

    /// Simulated duration in hours
    #[arg(long, default_value_t = 5.0)]
    hours: f64,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print messages and badges as they happen
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{}", "🚂 Kereta Journey Simulator".bright_cyan().bold());
    println!("{}", "================================".cyan());

    let config = build_config(&args);
    let summary = run_simulation(&config)?;

    let mut out = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => harness::render_console(&summary, &mut out)?,
        ReportFormat::Json => harness::render_json(&summary, &mut out)?,
    }
    out.flush_inner()?;
    Ok(())
}

fn build_config(args: &Args) -> RunConfig {
    let feed = if args.demo {
        FeedConfig::Stepper {
            speed_multiplier: args.speed_multiplier,
        }
    } else {
        FeedConfig::Simulator {
            speed_mps: args.speed_mps,
        }
    };
    RunConfig {
        seed: args.seed,
        feed,
        hours: args.hours,
        verbose: args.verbose,
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
