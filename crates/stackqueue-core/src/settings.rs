use std::path::{Path, PathBuf};

use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StackQueueError};
use crate::run_config::RemainderPolicy;

/// What a non-blocking consumer does when the container is momentarily empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStrategy {
    /// Give up the time slice and re-poll immediately.
    #[default]
    Yield,
    /// Spin then yield with a bounded exponential backoff. Changes measured
    /// throughput relative to `Yield`.
    Backoff,
}

impl std::str::FromStr for PollStrategy {
    type Err = StackQueueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yield" => Ok(Self::Yield),
            "backoff" => Ok(Self::Backoff),
            other => Err(StackQueueError::InvalidConfig(format!(
                "unknown poll strategy '{other}'"
            ))),
        }
    }
}

/// Settings for a full benchmark sweep.
///
/// Loaded from an optional TOML file, then `STACKQUEUE__*` environment
/// variables (lists are comma separated), then CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    pub producers: Vec<usize>,
    pub consumers: Vec<usize>,
    pub total_items: usize,
    pub log_file: PathBuf,
    pub remainder: RemainderPolicy,
    pub poll: PollStrategy,
    /// Slot count of the bounded SPSC ring; rounded up to a power of two.
    pub spsc_capacity: usize,
}

/// Upper bound for `spsc_capacity`, the largest ring the SPSC queue allocates.
pub const MAX_SPSC_CAPACITY: usize = 1 << 24;

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            producers: vec![1, 2, 4],
            consumers: vec![1, 2, 4],
            total_items: 100_000,
            log_file: PathBuf::from("benchmark_results.csv"),
            remainder: RemainderPolicy::AssignToLast,
            poll: PollStrategy::Yield,
            spsc_capacity: 1024,
        }
    }
}

impl BenchSettings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = cfg::Config::builder();
        if let Some(path) = file {
            debug!("Loading settings from {:?}", path);
            builder = builder.add_source(cfg::File::from(path).required(true));
        }
        builder = builder.add_source(
            cfg::Environment::with_prefix("STACKQUEUE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("producers")
                .with_list_parse_key("consumers")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.producers.is_empty() || self.consumers.is_empty() {
            return Err(StackQueueError::InvalidConfig(
                "producer and consumer sweeps need at least one entry".into(),
            ));
        }
        if self.producers.contains(&0) || self.consumers.contains(&0) {
            return Err(StackQueueError::InvalidConfig(
                "thread counts must be at least 1".into(),
            ));
        }
        if self.total_items == 0 {
            return Err(StackQueueError::InvalidConfig(
                "total item count must be at least 1".into(),
            ));
        }
        if !(2..=MAX_SPSC_CAPACITY).contains(&self.spsc_capacity) {
            return Err(StackQueueError::InvalidConfig(format!(
                "spsc capacity must be between 2 and {MAX_SPSC_CAPACITY}, got {}",
                self.spsc_capacity
            )));
        }
        Ok(())
    }
}
