// service duration generation.
//
// treated as an external collaborator so tests can substitute deterministic
// durations for the seeded pseudo-random ones the simulation uses.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::time::Duration;

/// Source of simulated service durations.
pub trait DurationSource: Send {
    /// The duration the next service should take.
    fn next_duration(&mut self) -> Duration;
}

/// The fixed seed the simulation has always run with.
pub const DEFAULT_SEED: u64 = 99;

/// Repeatable pseudo-random durations of whole seconds in `0..=max_secs`.
pub struct SeededDurations {
    rng: Pcg64,
    max_secs: u64,
}

impl SeededDurations {
    pub fn new(seed: u64, max_secs: u64) -> Self {
        SeededDurations { rng: Pcg64::seed_from_u64(seed), max_secs }
    }

    /// Durations for the single-queue variant (0 to 5 whole seconds).
    pub fn single_queue() -> Self {
        SeededDurations::new(DEFAULT_SEED, 5)
    }

    /// Durations for the tiered variants (0 to 2 whole seconds).
    pub fn tiered() -> Self {
        SeededDurations::new(DEFAULT_SEED, 2)
    }
}

impl DurationSource for SeededDurations {
    fn next_duration(&mut self) -> Duration {
        Duration::from_secs(self.rng.gen_range(0..=self.max_secs))
    }
}

/// Deterministic source returning the same duration every time.
pub struct FixedDurations(pub Duration);

impl DurationSource for FixedDurations {
    fn next_duration(&mut self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_durations_are_repeatable() {
        let mut a = SeededDurations::new(DEFAULT_SEED, 5);
        let mut b = SeededDurations::new(DEFAULT_SEED, 5);
        for _ in 0..32 {
            assert_eq!(a.next_duration(), b.next_duration());
        }
    }

    #[test]
    fn seeded_durations_stay_in_bounds() {
        let mut source = SeededDurations::tiered();
        for _ in 0..128 {
            assert!(source.next_duration() <= Duration::from_secs(2));
        }
    }

    #[test]
    fn fixed_durations_are_constant() {
        let mut source = FixedDurations(Duration::from_millis(250));
        assert_eq!(source.next_duration(), Duration::from_millis(250));
        assert_eq!(source.next_duration(), Duration::from_millis(250));
    }
}
