use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber. Output goes to stderr so stdout
/// stays reserved for benchmark reports. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "stackqueue=debug,stackqueue_bench=debug,stackqueue_core=debug"
    } else {
        "stackqueue=info,stackqueue_bench=info,stackqueue_core=info"
    };

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
