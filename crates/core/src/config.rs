use crate::SEATS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max effect wait must be positive")]
    ZeroMaxEffectWait,
    #[error("effect wait {wait} exceeds max effect wait {max}")]
    EffectWaitAboveMax { wait: u32, max: u32 },
    #[error("opening seat {0} is out of range")]
    OpeningSeatOutOfRange(usize),
    #[error("pass-out threshold must be positive")]
    ZeroPassOutThreshold,
}

/// Pacing and table rules for one round. All durations are in ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoundConfig {
    pub deal_delay_ticks: u32,
    pub turn_delay_ticks: u32,
    pub effect_wait_ticks: u32,
    pub max_effect_wait_ticks: u32,
    /// Seat that takes the first turn once dealing completes.
    pub opening_seat: usize,
    pub pass_out_threshold: u8,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            deal_delay_ticks: 4,
            turn_delay_ticks: 20,
            effect_wait_ticks: 60,
            max_effect_wait_ticks: 120,
            opening_seat: 1,
            pass_out_threshold: (SEATS - 1) as u8,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_effect_wait_ticks == 0 {
            return Err(ConfigError::ZeroMaxEffectWait);
        }
        if self.effect_wait_ticks > self.max_effect_wait_ticks {
            return Err(ConfigError::EffectWaitAboveMax {
                wait: self.effect_wait_ticks,
                max: self.max_effect_wait_ticks,
            });
        }
        if self.opening_seat >= SEATS {
            return Err(ConfigError::OpeningSeatOutOfRange(self.opening_seat));
        }
        if self.pass_out_threshold == 0 {
            return Err(ConfigError::ZeroPassOutThreshold);
        }
        Ok(())
    }

    /// Requested display wait clamped to the configured maximum.
    pub fn clamp_wait(&self, requested: u32) -> u32 {
        requested.min(self.max_effect_wait_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(RoundConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let config = RoundConfig {
            effect_wait_ticks: 200,
            ..RoundConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EffectWaitAboveMax { wait: 200, max: 120 })
        );
        let config = RoundConfig {
            opening_seat: 4,
            ..RoundConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::OpeningSeatOutOfRange(4)));
    }
}
