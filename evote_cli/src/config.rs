use std::env::var;
use thiserror::Error;

pub const DEFAULT_KEYPAIR_PATH: &str = "./evote-keypair.json";
pub const DEFAULT_MAX_BOUND: u64 = 10_000_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EVOTE_MAX_BOUND must be a positive integer, got {0:?}")]
    InvalidMaxBound(String),

    #[error("EVOTE_MAX_BOUND of {0} exceeds the decoder limit of {}", evote::DiscreteLogTable::MAX_BOUND)]
    MaxBoundTooLarge(u64),

    #[error("EVOTE_KEYPAIR must not be empty")]
    EmptyKeypairPath,
}

pub struct Config {
    /// Where the authority key pair is written by `keygen` and read by `decrypt`
    pub keypair_path: String,

    /// Largest tally size the discrete log decoder will be asked to search
    pub max_bound: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_vars(var("EVOTE_KEYPAIR").ok(), var("EVOTE_MAX_BOUND").ok())
    }

    fn from_vars(keypair: Option<String>, max_bound: Option<String>) -> Result<Self, ConfigError> {
        let keypair_path = match keypair {
            Some(val) if val.trim().is_empty() => return Err(ConfigError::EmptyKeypairPath),
            Some(val) => val,
            None => DEFAULT_KEYPAIR_PATH.to_owned(),
        };

        let max_bound = match max_bound {
            Some(val) => match val.trim().replace('_', "").parse::<u64>() {
                Ok(bound) if bound > evote::DiscreteLogTable::MAX_BOUND => {
                    return Err(ConfigError::MaxBoundTooLarge(bound))
                }
                Ok(bound) if bound > 0 => bound,
                _ => return Err(ConfigError::InvalidMaxBound(val)),
            },
            None => DEFAULT_MAX_BOUND,
        };

        Ok(Config {
            keypair_path,
            max_bound,
        })
    }
}
