//! Chaos preview: emit a handful of events with a pause between them

use crate::domain::{ChaosEvent, EventGenerator};
use crate::infrastructure::log_messages::preview as messages;
use crate::infrastructure::EventSink;
use crate::Result;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaosPreview {
    event_count: u64,
    pause: Duration,
}

impl ChaosPreview {
    pub fn new(event_count: u64, pause: Duration) -> Self {
        Self { event_count, pause }
    }

    /// Emit `event_count` events to `sink`, returning what was emitted
    #[instrument(skip_all, fields(event_count = self.event_count))]
    pub async fn run<R, S>(
        &self,
        generator: &EventGenerator,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<Vec<ChaosEvent>>
    where
        R: Rng,
        S: EventSink + ?Sized,
    {
        info!("{}", messages::STARTED);
        let mut emitted = Vec::new();

        for i in 0..self.event_count {
            if i > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
            let event = generator.generate(rng);
            sink.emit(&event)?;
            debug!(kind = event.kind(), timestamp = %event.timestamp(), "{}", messages::EVENT_EMITTED);
            emitted.push(event);
        }

        info!(emitted = emitted.len(), "{}", messages::COMPLETED);
        Ok(emitted)
    }
}
