use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use stackqueue_bench::{run_sweep, ConsoleReport, ResultLog, Variant};
use stackqueue_core::{init_tracing, BenchSettings, PollStrategy, RemainderPolicy};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Process exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ReturnCode {
    Success = 0,
    Error = 1,
}

impl From<ReturnCode> for ExitCode {
    fn from(code: ReturnCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "stackqueue")]
#[command(about = "StackQueue - producer/consumer benchmarks for stacks and queues", long_about = None)]
#[command(version)]
struct Cli {
    /// Producer thread counts to sweep (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    producers: Option<Vec<usize>>,

    /// Consumer thread counts to sweep (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    consumers: Option<Vec<usize>>,

    /// Total items pushed per run
    #[arg(short = 'n', long)]
    total_items: Option<usize>,

    /// Append-only CSV result log
    #[arg(short, long, env = "STACKQUEUE_LOG")]
    log_file: Option<PathBuf>,

    /// Only run these variants (comma-separated, see --list)
    #[arg(long = "variant", value_delimiter = ',')]
    variants: Vec<Variant>,

    /// What to do with items that do not divide evenly (assign_to_last, truncate)
    #[arg(long)]
    remainder: Option<RemainderPolicy>,

    /// Idle strategy for polling consumers (yield, backoff)
    #[arg(long)]
    poll: Option<PollStrategy>,

    /// Ring size of the SPSC queue
    #[arg(long)]
    spsc_capacity: Option<usize>,

    /// Truncate the result log before running
    #[arg(long)]
    fresh: bool,

    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List benchmark variants and exit
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags given on the command line win over file and environment settings.
    fn apply(&self, settings: &mut BenchSettings) {
        if let Some(producers) = &self.producers {
            settings.producers = producers.clone();
        }
        if let Some(consumers) = &self.consumers {
            settings.consumers = consumers.clone();
        }
        if let Some(total_items) = self.total_items {
            settings.total_items = total_items;
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = log_file.clone();
        }
        if let Some(remainder) = self.remainder {
            settings.remainder = remainder;
        }
        if let Some(poll) = self.poll {
            settings.poll = poll;
        }
        if let Some(capacity) = self.spsc_capacity {
            settings.spsc_capacity = capacity;
        }
    }

    fn selected_variants(&self) -> Vec<Variant> {
        if self.variants.is_empty() {
            Variant::ALL.to_vec()
        } else {
            self.variants.clone()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match panic::catch_unwind(move || run(cli)) {
        Ok(Ok(())) => ReturnCode::Success.into(),
        Ok(Err(e)) => {
            println!("{} {:#}", "Error:".red().bold(), e);
            ReturnCode::Error.into()
        }
        Err(_) => {
            println!("{} unknown error occurred", "Error:".red().bold());
            ReturnCode::Error.into()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list {
        for variant in Variant::ALL {
            let kind = if variant.is_blocking() { "blocking" } else { "polling" };
            println!("{:<18} {}", variant.name().green(), kind);
        }
        return Ok(());
    }

    let mut settings =
        BenchSettings::load(cli.config.as_deref()).context("loading benchmark settings")?;
    cli.apply(&mut settings);
    settings
        .validate()
        .context("validating benchmark settings")?;
    info!(remainder = settings.remainder.description(), "settings loaded");

    let log = ResultLog::new(&settings.log_file);
    if cli.fresh {
        log.reset()
            .with_context(|| format!("truncating result log {:?}", log.path()))?;
    }

    println!("{}", "Running all benchmarks:".bold());
    println!("========================\n");

    let console = ConsoleReport;
    let results = run_sweep(&settings, &cli.selected_variants(), &[&console, &log])?;

    let broken: Vec<&str> = results
        .iter()
        .filter(|r| !r.is_consistent())
        .map(|r| r.name.as_str())
        .collect();
    if !broken.is_empty() {
        bail!("item accounting mismatch in: {}", broken.join(", "));
    }

    info!(runs = results.len(), log = ?settings.log_file, "sweep complete");
    Ok(())
}
