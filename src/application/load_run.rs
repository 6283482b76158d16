//! Load run: seed every target with generated records
//!
//! Targets are independent. A target that fails setup or a write is reported
//! and dropped from the run while the others keep receiving records.

use crate::domain::RecordGenerator;
use crate::infrastructure::log_messages::load as messages;
use crate::infrastructure::RecordSink;
use crate::{Error, Result};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// How a single sink fared over the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkStatus {
    Completed,
    SetupFailed(String),
    WriteFailed { message: String },
    FinishFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOutcome {
    pub name: String,
    pub written: u64,
    pub status: SinkStatus,
}

impl SinkOutcome {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            written: 0,
            status: SinkStatus::Completed,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == SinkStatus::Completed
    }

    fn is_live(&self) -> bool {
        self.succeeded()
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub generated: u64,
    pub elapsed: Duration,
    pub sinks: Vec<SinkOutcome>,
}

impl LoadReport {
    pub fn outcome(&self, name: &str) -> Option<&SinkOutcome> {
        self.sinks.iter().find(|o| o.name == name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadRun {
    generator: RecordGenerator,
    batch_size: u64,
    progress_interval: u64,
}

impl LoadRun {
    /// `progress_interval` of zero disables progress logging
    pub fn new(generator: RecordGenerator, batch_size: u64, progress_interval: u64) -> Self {
        Self {
            generator,
            batch_size,
            progress_interval,
        }
    }

    #[instrument(skip_all, fields(batch_size = self.batch_size, sinks = sinks.len()))]
    pub fn execute<R: Rng>(
        &self,
        rng: &mut R,
        sinks: &mut [&mut dyn RecordSink],
    ) -> Result<LoadReport> {
        if sinks.is_empty() {
            return Err(Error::invalid_configuration(
                "load.targets: at least one target is required",
            ));
        }

        info!("{}", messages::SETUP_STARTED);
        let mut outcomes: Vec<SinkOutcome> =
            sinks.iter().map(|s| SinkOutcome::new(s.name())).collect();
        for (sink, outcome) in sinks.iter_mut().zip(&mut outcomes) {
            match sink.prepare() {
                Ok(()) => info!(sink = %outcome.name, "{}", messages::SINK_READY),
                Err(e) => {
                    error!(sink = %outcome.name, error = %e, "{}", messages::SINK_SETUP_FAILED);
                    outcome.status = SinkStatus::SetupFailed(e.to_string());
                }
            }
        }
        if !outcomes.iter().any(SinkOutcome::is_live) {
            return Err(Error::AllSinksFailed);
        }

        info!("{}", messages::RUN_STARTED);
        let started = Instant::now();
        let mut generated = 0;
        while generated < self.batch_size && outcomes.iter().any(SinkOutcome::is_live) {
            let record = self.generator.generate(rng);
            generated += 1;

            for (sink, outcome) in sinks.iter_mut().zip(&mut outcomes) {
                if !outcome.is_live() {
                    continue;
                }
                match sink.write(&record) {
                    Ok(()) => outcome.written += 1,
                    Err(e) => {
                        error!(
                            sink = %outcome.name,
                            written = outcome.written,
                            error = %e,
                            "{}", messages::SINK_WRITE_FAILED
                        );
                        outcome.status = SinkStatus::WriteFailed {
                            message: e.to_string(),
                        };
                    }
                }
            }

            if self.progress_interval > 0 && generated % self.progress_interval == 0 {
                info!(inserted = generated, total = self.batch_size, "{}", messages::PROGRESS);
            }
        }

        for (sink, outcome) in sinks.iter_mut().zip(&mut outcomes) {
            if !outcome.is_live() {
                continue;
            }
            if let Err(e) = sink.finish() {
                warn!(sink = %outcome.name, error = %e, "{}", messages::SINK_FINISH_FAILED);
                outcome.status = SinkStatus::FinishFailed(e.to_string());
            }
        }

        let elapsed = started.elapsed();
        info!(
            generated,
            elapsed_secs = elapsed.as_secs_f64(),
            "{}", messages::RUN_COMPLETED
        );

        if !outcomes.iter().any(SinkOutcome::succeeded) {
            return Err(Error::AllSinksFailed);
        }
        Ok(LoadReport {
            generated,
            elapsed,
            sinks: outcomes,
        })
    }
}
