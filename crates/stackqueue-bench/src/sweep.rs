use stackqueue_core::{BenchSettings, Result, RunConfig};
use tracing::{debug, info};

use crate::result::BenchmarkResult;
use crate::sink::ResultSink;
use crate::variants::{Variant, VariantOptions};

/// Run every variant for every (producers, consumers) pair of the settings,
/// in order. Each run gets its own container, counters and threads.
///
/// Variants that cannot take a given shape (SPSC beyond 1/1) are skipped.
pub fn run_sweep(
    settings: &BenchSettings,
    variants: &[Variant],
    sinks: &[&dyn ResultSink],
) -> Result<Vec<BenchmarkResult>> {
    settings.validate()?;
    let options = VariantOptions {
        poll: settings.poll,
        spsc_capacity: settings.spsc_capacity,
    };

    info!(
        total_items = settings.total_items,
        configurations = settings.producers.len() * settings.consumers.len(),
        variants = variants.len(),
        "Running all benchmarks"
    );

    let mut results = Vec::new();
    for &producers in &settings.producers {
        for &consumers in &settings.consumers {
            let config = RunConfig::new(producers, consumers, settings.total_items)
                .with_remainder(settings.remainder);
            for sink in sinks {
                sink.begin_group(producers, consumers);
            }
            for variant in variants {
                if !variant.supports(producers, consumers) {
                    debug!("skipping {} for {}/{}", variant, producers, consumers);
                    continue;
                }
                let result = variant.build(config, &options)?.run()?;
                for sink in sinks {
                    sink.record(&result);
                }
                results.push(result);
            }
            for sink in sinks {
                sink.end_group();
            }
        }
    }
    Ok(results)
}
