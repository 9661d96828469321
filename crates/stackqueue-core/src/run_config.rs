use serde::{Deserialize, Serialize};

use crate::error::{Result, StackQueueError};

/// How items that do not divide evenly across threads are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// The last thread picks up `total % threads` extra items, nothing is dropped.
    #[default]
    AssignToLast,
    /// Plain integer division; the remainder is never produced.
    Truncate,
}

impl RemainderPolicy {
    /// Items assigned to worker `index` of `workers` sharing `total`.
    pub fn quota(self, total: usize, workers: usize, index: usize) -> usize {
        let base = total / workers;
        match self {
            Self::AssignToLast if index + 1 == workers => base + total % workers,
            _ => base,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::AssignToLast => "remainder items go to the last thread",
            Self::Truncate => "remainder items are dropped",
        }
    }
}

impl std::str::FromStr for RemainderPolicy {
    type Err = StackQueueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "assign_to_last" | "assign-to-last" | "last" => Ok(Self::AssignToLast),
            "truncate" | "drop" => Ok(Self::Truncate),
            other => Err(StackQueueError::InvalidConfig(format!(
                "unknown remainder policy '{other}'"
            ))),
        }
    }
}

/// Shape of a single producer/consumer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub producers: usize,
    pub consumers: usize,
    pub total_items: usize,
    pub remainder: RemainderPolicy,
}

impl RunConfig {
    pub fn new(producers: usize, consumers: usize, total_items: usize) -> Self {
        Self {
            producers,
            consumers,
            total_items,
            remainder: RemainderPolicy::default(),
        }
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Rejects shapes that would divide by zero when computing quotas.
    pub fn validate(&self) -> Result<()> {
        if self.producers == 0 {
            return Err(StackQueueError::InvalidConfig(
                "producer count must be at least 1".into(),
            ));
        }
        if self.consumers == 0 {
            return Err(StackQueueError::InvalidConfig(
                "consumer count must be at least 1".into(),
            ));
        }
        if self.total_items == 0 {
            return Err(StackQueueError::InvalidConfig(
                "total item count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn producer_quotas(&self) -> Vec<usize> {
        (0..self.producers)
            .map(|i| self.remainder.quota(self.total_items, self.producers, i))
            .collect()
    }

    /// Consumer quotas split the items producers will actually emit, so a
    /// blocking consumer never waits for an item that is never produced.
    pub fn consumer_quotas(&self) -> Vec<usize> {
        let produced = self.expected_items();
        (0..self.consumers)
            .map(|i| self.remainder.quota(produced, self.consumers, i))
            .collect()
    }

    /// Total number of items the producers of this run will push.
    pub fn expected_items(&self) -> usize {
        match self.remainder {
            RemainderPolicy::AssignToLast => self.total_items,
            RemainderPolicy::Truncate => {
                (self.total_items / self.producers) * self.producers
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_is_identical_under_both_policies() {
        let base = RunConfig::new(2, 2, 100);
        for policy in [RemainderPolicy::AssignToLast, RemainderPolicy::Truncate] {
            let cfg = base.with_remainder(policy);
            assert_eq!(cfg.producer_quotas(), vec![50, 50]);
            assert_eq!(cfg.consumer_quotas(), vec![50, 50]);
            assert_eq!(cfg.expected_items(), 100);
        }
    }

    #[test]
    fn assign_to_last_keeps_every_item() {
        let cfg = RunConfig::new(3, 4, 10);
        assert_eq!(cfg.producer_quotas(), vec![3, 3, 4]);
        assert_eq!(cfg.consumer_quotas(), vec![2, 2, 2, 4]);
        assert_eq!(cfg.producer_quotas().iter().sum::<usize>(), 10);
        assert_eq!(cfg.consumer_quotas().iter().sum::<usize>(), 10);
    }

    #[test]
    fn truncate_drops_the_remainder() {
        let cfg = RunConfig::new(3, 2, 10).with_remainder(RemainderPolicy::Truncate);
        assert_eq!(cfg.producer_quotas(), vec![3, 3, 3]);
        assert_eq!(cfg.expected_items(), 9);
        // consumers share the nine produced items, leaving one behind
        assert_eq!(cfg.consumer_quotas(), vec![4, 4]);
    }

    #[test]
    fn more_threads_than_items() {
        let cfg = RunConfig::new(4, 1, 2);
        assert_eq!(cfg.producer_quotas(), vec![0, 0, 0, 2]);
        assert_eq!(cfg.consumer_quotas(), vec![2]);
    }

    #[test]
    fn zero_counts_are_rejected() {
        assert!(RunConfig::new(0, 1, 10).validate().is_err());
        assert!(RunConfig::new(1, 0, 10).validate().is_err());
        assert!(RunConfig::new(1, 1, 0).validate().is_err());
        assert!(RunConfig::new(1, 1, 1).validate().is_ok());
    }

    #[test]
    fn remainder_policy_parses() {
        assert_eq!(
            "truncate".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::Truncate
        );
        assert_eq!(
            "assign-to-last".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::AssignToLast
        );
        assert!("sometimes".parse::<RemainderPolicy>().is_err());
    }
}
