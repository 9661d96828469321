use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackQueueError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{role} thread {index} panicked")]
    WorkerPanicked { role: WorkerRole, index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which side of a producer/consumer run a worker thread belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    Producer,
    Consumer,
}

impl std::fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Producer => f.write_str("producer"),
            Self::Consumer => f.write_str("consumer"),
        }
    }
}

pub type Result<T> = std::result::Result<T, StackQueueError>;
