use std::fmt;
use std::time::Duration;

/// Outcome of one benchmark run. Created once by [`crate::Benchmark::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    pub name: String,
    pub producers: usize,
    pub consumers: usize,
    pub total_items: usize,
    pub duration: Duration,
    /// Items actually pushed by all producers.
    pub produced: usize,
    /// Items actually removed by all consumers.
    pub consumed: usize,
    /// Items left in the container after every thread was joined.
    pub remaining: usize,
}

impl BenchmarkResult {
    pub fn duration_ms(&self) -> u128 {
        self.duration.as_millis()
    }

    /// Every produced item is accounted for exactly once.
    pub fn is_consistent(&self) -> bool {
        self.produced == self.consumed + self.remaining
    }

    /// Items of the configured total that were never produced.
    pub fn dropped(&self) -> usize {
        self.total_items.saturating_sub(self.produced)
    }

    /// `name,producers,consumers,total_items,duration_ms` plus a newline.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}\n",
            self.name,
            self.producers,
            self.consumers,
            self.total_items,
            self.duration_ms()
        )
    }

    pub fn items_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        self.consumed as f64 / secs
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} producers, {} consumers, {} items total - {} ms",
            self.name,
            self.producers,
            self.consumers,
            self.total_items,
            self.duration_ms()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BenchmarkResult {
        BenchmarkResult {
            name: "queue_mutex".into(),
            producers: 2,
            consumers: 2,
            total_items: 100,
            duration: Duration::from_millis(7),
            produced: 100,
            consumed: 100,
            remaining: 0,
        }
    }

    #[test]
    fn console_line_format() {
        assert_eq!(
            sample().to_string(),
            "queue_mutex: 2 producers, 2 consumers, 100 items total - 7 ms"
        );
    }

    #[test]
    fn csv_line_format() {
        assert_eq!(sample().to_csv_line(), "queue_mutex,2,2,100,7\n");
    }

    #[test]
    fn throughput_counts_consumed_items() {
        let mut r = sample();
        r.duration = Duration::from_millis(500);
        assert_eq!(r.items_per_second(), 200.0);
        r.duration = Duration::ZERO;
        assert!(r.items_per_second().is_infinite());
    }

    #[test]
    fn consistency_and_drops() {
        let mut r = sample();
        assert!(r.is_consistent());
        assert_eq!(r.dropped(), 0);

        r.produced = 99;
        r.consumed = 98;
        r.remaining = 1;
        assert!(r.is_consistent());
        assert_eq!(r.dropped(), 1);

        r.consumed = 99;
        assert!(!r.is_consistent());
    }
}
