use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unable to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("unable to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("unable to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid {name}: {value:?}")]
    Argument { name: &'static str, value: String },

    #[error("ballot {index} rejected: {source}")]
    InvalidBallot { index: usize, source: evote::Error },

    #[error("tally of {bound} votes exceeds EVOTE_MAX_BOUND of {max}")]
    BoundTooLarge { bound: u64, max: u64 },

    #[error(transparent)]
    Evote(#[from] evote::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
