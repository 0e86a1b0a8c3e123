use crate::AutoplayError;
use daifugo_core::{RoundConfig, Seat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub rounds: u32,
    /// Seat that receives the first dealt card.
    pub deal_start: Seat,
    /// Give up on a round after this many ticks.
    pub max_ticks: u64,
    pub round: RoundConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            rounds: 1,
            deal_start: 0,
            max_ticks: 200_000,
            round: RoundConfig::default(),
        }
    }
}

impl AutoplayConfig {
    pub fn load(path: &Path) -> Result<Self, AutoplayError> {
        let body = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&body)?;
        config.round.validate()?;
        Ok(config)
    }

    /// Seed used for the `index`-th round of a series.
    pub fn round_seed(&self, index: u32) -> u64 {
        self.seed.wrapping_add(u64::from(index))
    }
}
