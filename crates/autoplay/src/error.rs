use daifugo_core::{ConfigError, DealError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("deal error: {0}")]
    Deal(#[from] DealError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("card conservation broken at tick {tick}: {held} held + {played} played != {dealt}")]
    Conservation {
        tick: u64,
        held: usize,
        played: usize,
        dealt: usize,
    },
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
