// startup configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Scalar parameters read once at startup.
///
/// There is no dynamic reconfiguration: a [`Config`] is validated before any
/// task is spawned and then only read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    /// Number of high-priority requesters to spawn.
    pub high_requesters: usize,
    /// Number of low-priority requesters to spawn.
    pub low_requesters: usize,
    /// Capacity of the high-priority queue.
    pub high_capacity: usize,
    /// Capacity of the low-priority queue.
    pub low_capacity: usize,
    /// Capacity of the main queue the provider polls (also the capacity of
    /// the single queue in the single-queue variant).
    pub main_capacity: usize,
    /// Period between aging promotions of low-priority work.
    pub aging_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            high_requesters: 7,
            low_requesters: 3,
            high_capacity: 100,
            low_capacity: 5,
            main_capacity: 5,
            aging_period: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Defaults for the two-tier variant, which historically ran with a much
    /// longer aging period.
    pub fn two_tier_defaults() -> Self {
        Config {
            aging_period: Duration::from_secs(10),
            ..Config::default()
        }
    }

    /// Fail fast on malformed parameters, before anything is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("high priority"));
        }
        if self.low_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("low priority"));
        }
        if self.main_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("main"));
        }
        if self.aging_period.is_zero() {
            return Err(ConfigError::ZeroAgingPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
        Config::two_tier_defaults().validate().unwrap();
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = Config { main_capacity: 0, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity("main")));
    }

    #[test]
    fn zero_aging_period_is_rejected() {
        let config = Config { aging_period: Duration::ZERO, ..Config::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAgingPeriod));
    }
}
