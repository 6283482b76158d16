//! Tunable weights and value ranges for chaos events

use crate::domain::validation_constants::events as defaults;
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            return Err(Error::invalid_configuration(format!(
                "{field}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Inclusive range of fractions within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionRange {
    pub min: f64,
    pub max: f64,
}

impl FractionRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, field: &str) -> Result<()> {
        let in_unit = |x: f64| x.is_finite() && (0.0..=1.0).contains(&x);
        if !in_unit(self.min) || !in_unit(self.max) || self.min > self.max {
            return Err(Error::invalid_configuration(format!(
                "{field}: expected 0 <= min <= max <= 1, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Shape of the generated event stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventProfile {
    pub query_weight: u32,
    pub error_weight: u32,
    pub duration_ms: IntRange,
    pub cpu_fraction: FractionRange,
    pub logical_reads: IntRange,
    pub price: IntRange,
    pub record_id: IntRange,
    pub process_id: IntRange,
}

impl EventProfile {
    /// Check every range; weights are checked when the generator builds its
    /// distribution
    pub fn validate(&self) -> Result<()> {
        self.duration_ms.validate("events.duration_ms")?;
        self.cpu_fraction.validate("events.cpu_fraction")?;
        self.logical_reads.validate("events.logical_reads")?;
        self.price.validate("events.price")?;
        self.record_id.validate("events.record_id")?;
        self.process_id.validate("events.process_id")
    }
}

impl Default for EventProfile {
    fn default() -> Self {
        Self {
            query_weight: defaults::DEFAULT_QUERY_WEIGHT,
            error_weight: defaults::DEFAULT_ERROR_WEIGHT,
            duration_ms: IntRange::new(defaults::DURATION_MS_MIN, defaults::DURATION_MS_MAX),
            cpu_fraction: FractionRange::new(
                defaults::CPU_FRACTION_MIN,
                defaults::CPU_FRACTION_MAX,
            ),
            logical_reads: IntRange::new(
                defaults::LOGICAL_READS_MIN,
                defaults::LOGICAL_READS_MAX,
            ),
            price: IntRange::new(defaults::PRICE_MIN, defaults::PRICE_MAX),
            record_id: IntRange::new(defaults::RECORD_ID_MIN, defaults::RECORD_ID_MAX),
            process_id: IntRange::new(defaults::PROCESS_ID_MIN, defaults::PROCESS_ID_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = EventProfile::default();

        assert!(profile.validate().is_ok());
        assert_eq!(profile.duration_ms, IntRange::new(100, 15_000));
        assert_eq!(profile.logical_reads, IntRange::new(1_000, 500_000));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let profile = EventProfile {
            price: IntRange::new(1_000, 10),
            ..EventProfile::default()
        };

        let Err(Error::InvalidConfiguration { field }) = profile.validate() else {
            panic!("expected configuration error");
        };
        assert!(field.starts_with("events.price"));
    }

    #[rstest]
    #[case(-0.1, 0.5)]
    #[case(0.5, 1.5)]
    #[case(0.9, 0.5)]
    #[case(f64::NAN, 0.5)]
    fn test_bad_cpu_fraction_is_rejected(#[case] min: f64, #[case] max: f64) {
        let profile = EventProfile {
            cpu_fraction: FractionRange::new(min, max),
            ..EventProfile::default()
        };

        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_degenerate_range_samples_its_only_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = IntRange::new(77, 77);

        assert!((0..20).all(|_| range.sample(&mut rng) == 77));
    }
}
