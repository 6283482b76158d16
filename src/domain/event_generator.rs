//! Chaos event generation
//!
//! Picks a query or error event by weight, then fills in randomized fields
//! and template placeholders from the [`EventProfile`].

use crate::domain::event_profile::EventProfile;
use crate::domain::events::{ChaosEvent, ErrorEvent, EventTimestamp, QueryEvent, Severity, WaitType};
use crate::domain::templates::{CompiledTemplate, Placeholder, TemplateTable};
use crate::domain::validation_constants::events::DATE_FORMAT;
use crate::Result;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Two-letter postal codes of the fifty US states
pub const STATE_CODES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

const QUERY_KIND: usize = 0;

#[derive(Debug, Clone)]
pub struct EventGenerator {
    profile: EventProfile,
    templates: TemplateTable,
    kinds: WeightedIndex<u32>,
}

impl EventGenerator {
    /// Validate `profile` and compile the template table
    pub fn new(profile: EventProfile) -> Result<Self> {
        profile.validate()?;
        let kinds = WeightedIndex::new([profile.query_weight, profile.error_weight])?;
        Ok(Self {
            profile,
            templates: TemplateTable::new()?,
            kinds,
        })
    }

    pub fn profile(&self) -> &EventProfile {
        &self.profile
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    /// Generate one event stamped with the current wall-clock time
    pub fn generate<R: Rng>(&self, rng: &mut R) -> ChaosEvent {
        self.generate_at(rng, Utc::now())
    }

    /// Generate one event stamped `at`; dates in SQL text never pass `at`
    pub fn generate_at<R: Rng>(&self, rng: &mut R, at: DateTime<Utc>) -> ChaosEvent {
        if self.kinds.sample(rng) == QUERY_KIND {
            ChaosEvent::Query(self.query_event(rng, at))
        } else {
            ChaosEvent::Error(self.error_event(rng, at))
        }
    }

    fn query_event<R: Rng>(&self, rng: &mut R, at: DateTime<Utc>) -> QueryEvent {
        let duration_ms = self.profile.duration_ms.sample(rng);
        let cpu_time_ms = (f64::from(duration_ms) * self.profile.cpu_fraction.sample(rng)) as u32;
        let logical_reads = self.profile.logical_reads.sample(rng);
        let wait_type = WaitType::ALL[rng.random_range(0..WaitType::ALL.len())];
        let sql_text = self.render(self.templates.sql_templates(), rng, at.date_naive());

        QueryEvent {
            timestamp: EventTimestamp::from(at),
            duration_ms,
            cpu_time_ms,
            logical_reads,
            wait_type,
            sql_text,
        }
    }

    fn error_event<R: Rng>(&self, rng: &mut R, at: DateTime<Utc>) -> ErrorEvent {
        let severity = Severity::ALL[rng.random_range(0..Severity::ALL.len())];
        let message = self.render(self.templates.error_templates(), rng, at.date_naive());

        ErrorEvent {
            timestamp: EventTimestamp::from(at),
            severity,
            message,
        }
    }

    fn render<R: Rng>(&self, templates: &[CompiledTemplate], rng: &mut R, today: NaiveDate) -> String {
        let Some(template) = templates.choose(rng) else {
            return String::new();
        };
        template.render(|placeholder| self.fill(placeholder, rng, today))
    }

    fn fill<R: Rng>(&self, placeholder: Placeholder, rng: &mut R, today: NaiveDate) -> String {
        match placeholder {
            Placeholder::Date => date_this_decade(rng, today).format(DATE_FORMAT).to_string(),
            Placeholder::Price => self.profile.price.sample(rng).to_string(),
            Placeholder::RecordId => self.profile.record_id.sample(rng).to_string(),
            Placeholder::Region => STATE_CODES[rng.random_range(0..STATE_CODES.len())].to_string(),
            Placeholder::ProcessId => self.profile.process_id.sample(rng).to_string(),
        }
    }
}

/// A day between January 1st of `today`'s decade and `today`, inclusive
pub fn date_this_decade<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let decade = today.year() - today.year().rem_euclid(10);
    let Some(start) = NaiveDate::from_ymd_opt(decade, 1, 1) else {
        return today;
    };
    let span = u64::try_from((today - start).num_days()).unwrap_or(0);
    start
        .checked_add_days(Days::new(rng.random_range(0..=span)))
        .unwrap_or(today)
}
