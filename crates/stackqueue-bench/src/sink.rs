use colored::Colorize;
use stackqueue_core::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::result::BenchmarkResult;

/// Destination for finished runs.
pub trait ResultSink {
    fn record(&self, result: &BenchmarkResult);

    /// Called before the runs of one (producers, consumers) pair.
    fn begin_group(&self, _producers: usize, _consumers: usize) {}

    fn end_group(&self) {}
}

/// Human-readable lines on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReport;

impl ConsoleReport {
    pub fn print_result(result: &BenchmarkResult) {
        println!("{result}");
    }
}

impl ResultSink for ConsoleReport {
    fn record(&self, result: &BenchmarkResult) {
        Self::print_result(result);
    }

    fn begin_group(&self, producers: usize, consumers: usize) {
        println!(
            "{}",
            format!("{producers} producer(s), {consumers} consumer(s):").bold()
        );
    }

    fn end_group(&self) {
        println!();
    }
}

/// Append-only CSV log, one `name,producers,consumers,total_items,duration_ms`
/// line per run, no header.
///
/// Writing is best effort: a log that cannot be opened or appended to is
/// reported through `tracing` and otherwise ignored so the sweep keeps going.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log. Unlike appends this is an explicit request, so
    /// failure is returned.
    pub fn reset(&self) -> Result<()> {
        File::create(&self.path)?;
        debug!("Truncated result log {:?}", self.path);
        Ok(())
    }

    pub fn write_result_to_file(&self, result: &BenchmarkResult) {
        if let Err(e) = self.append(result) {
            warn!("could not append to result log {:?}: {}", self.path, e);
        }
    }

    fn append(&self, result: &BenchmarkResult) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(result.to_csv_line().as_bytes())
    }
}

impl ResultSink for ResultLog {
    fn record(&self, result: &BenchmarkResult) {
        self.write_result_to_file(result);
    }
}
