//! Property-based tests for generator invariants
//!
//! These tests verify that the norm, range and template invariants hold for
//! every seed and every valid configuration.

use chaos_loadgen::domain::{
    generate_unit_vector, ChaosEvent, Dimension, EventGenerator, EventProfile, IntRange, Severity,
    TemplateId, TemplateTable, WaitType,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const NORM_TOLERANCE: f64 = 1e-6;

// Property test generators
pub mod generators {
    use super::*;

    /// Valid embedding dimensions, biased towards small sizes
    pub fn dimension() -> impl Strategy<Value = Dimension> {
        prop_oneof![
            4 => 1usize..64,
            1 => 64usize..=2048,
            1 => Just(1536usize),
        ]
        .prop_map(|len| Dimension::try_new(len).unwrap())
    }

    /// Non-empty inclusive ranges
    pub fn int_range(floor: u32, ceiling: u32) -> impl Strategy<Value = IntRange> {
        (floor..=ceiling, floor..=ceiling).prop_map(|(a, b)| IntRange::new(a.min(b), a.max(b)))
    }

    /// Event profiles with at least one non-zero weight
    pub fn event_profile() -> impl Strategy<Value = EventProfile> {
        (0u32..10, 0u32..10, int_range(1, 20_000), int_range(0, 1_000_000))
            .prop_filter("at least one weight", |(q, e, _, _)| q + e > 0)
            .prop_map(
                |(query_weight, error_weight, duration_ms, logical_reads)| EventProfile {
                    query_weight,
                    error_weight,
                    duration_ms,
                    logical_reads,
                    ..EventProfile::default()
                },
            )
    }

    /// Instants between 2020 and 2040
    pub fn instant() -> impl Strategy<Value = DateTime<Utc>> {
        (0i64..20 * 365 * 24 * 3600).prop_map(|offset| {
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset)
        })
    }
}

fn templates() -> TemplateTable {
    TemplateTable::new().expect("built-in templates compile")
}

/// The quoted date in `OrdersSince` and `PurgeAuditLogs` text, if any
fn quoted_date(sql: &str) -> Option<NaiveDate> {
    let quoted = sql.split('\'').nth(1)?;
    NaiveDate::parse_from_str(quoted, "%Y-%m-%d").ok()
}

proptest! {
    #[test]
    fn generated_vectors_are_unit_norm(seed in any::<u64>(), dimension in generators::dimension()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let unit = generate_unit_vector(&mut rng, dimension);

        prop_assert_eq!(unit.len(), dimension.into_inner());
        prop_assert!((unit.norm() - 1.0).abs() < NORM_TOLERANCE);
        prop_assert!(unit.as_slice().iter().all(|x| x.is_finite() && *x >= 0.0));
    }

    #[test]
    fn same_seed_same_vector(seed in any::<u64>(), dimension in generators::dimension()) {
        let first = generate_unit_vector(&mut StdRng::seed_from_u64(seed), dimension);
        let second = generate_unit_vector(&mut StdRng::seed_from_u64(seed), dimension);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn events_respect_the_profile(
        seed in any::<u64>(),
        profile in generators::event_profile(),
        at in generators::instant(),
    ) {
        let generator = EventGenerator::new(profile).unwrap();
        let table = templates();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..50 {
            match generator.generate_at(&mut rng, at) {
                ChaosEvent::Query(event) => {
                    let duration = f64::from(event.duration_ms);
                    let cpu = f64::from(event.cpu_time_ms);
                    prop_assert!(profile.query_weight > 0);
                    prop_assert!(profile.duration_ms.contains(event.duration_ms));
                    prop_assert!(profile.logical_reads.contains(event.logical_reads));
                    prop_assert!(cpu >= (0.5 * duration).floor());
                    prop_assert!(cpu <= 0.9 * duration);
                    prop_assert!(WaitType::ALL.contains(&event.wait_type));
                    prop_assert!(matches!(table.identify(&event.sql_text), Some(TemplateId::Sql(_))));
                    prop_assert_eq!(event.timestamp.into_datetime().timestamp(), at.timestamp());
                }
                ChaosEvent::Error(event) => {
                    prop_assert!(profile.error_weight > 0);
                    prop_assert!(Severity::ALL.contains(&event.severity));
                    prop_assert!(matches!(table.identify(&event.message), Some(TemplateId::Error(_))));
                }
            }
        }
    }

    #[test]
    fn interpolated_dates_stay_within_the_decade(seed in any::<u64>(), at in generators::instant()) {
        let generator = EventGenerator::new(EventProfile {
            error_weight: 0,
            ..EventProfile::default()
        })
        .unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let today = at.date_naive();
        let decade = NaiveDate::from_ymd_opt(today.year() - today.year().rem_euclid(10), 1, 1).unwrap();

        for _ in 0..50 {
            let ChaosEvent::Query(event) = generator.generate_at(&mut rng, at) else {
                continue;
            };
            if let Some(date) = quoted_date(&event.sql_text) {
                prop_assert!(date >= decade, "{} before {}", date, decade);
                prop_assert!(date <= today, "{} after {}", date, today);
            }
        }
    }
}

#[test]
fn query_share_is_within_five_points_of_three_quarters() {
    let generator = EventGenerator::new(EventProfile::default()).unwrap();

    for seed in [1u64, 2, 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = 4_000u32;
        let queries = (0..samples)
            .filter(|_| generator.generate(&mut rng).is_query())
            .count();

        let share = queries as f64 / f64::from(samples);
        assert!((share - 0.75).abs() <= 0.05, "seed {seed}: share {share}");
    }
}
