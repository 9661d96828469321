pub mod error;
pub mod logging;
pub mod run_config;
pub mod settings;

pub use error::*;
pub use logging::init_tracing;
pub use run_config::*;
pub use settings::*;
