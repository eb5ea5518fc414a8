use std::{io, path::PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod opt;
pub mod region;
pub mod robotevents;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid match snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid team list: {0}")]
    Csv(#[from] csv::Error),
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}
