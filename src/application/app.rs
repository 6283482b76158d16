use crate::application::load_run::{LoadReport, LoadRun};
use crate::application::preview::ChaosPreview;
use crate::config::{RunMode, Settings};
use crate::domain::EventGenerator;
use crate::infrastructure::log_messages::application as messages;
use crate::infrastructure::{JsonLinesEventSink, RecordSink, TargetFileSink};
use crate::Result;
use std::io;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Main application struct that wires settings to a preview or load run
pub struct Application {
    settings: Settings,
    mode: RunMode,
}

impl Application {
    /// `mode` overrides the configured `run.mode` when given
    #[instrument(skip(settings))]
    pub fn new(settings: Settings, mode: Option<RunMode>) -> Self {
        let mode = mode.unwrap_or(settings.run.mode);
        info!(?mode, seeded = settings.run.seed.is_some(), "{}", messages::CONFIG_LOADED);
        Self { settings, mode }
    }

    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn run(self) -> Result<()> {
        info!("{}", messages::STARTING);
        match self.mode {
            RunMode::Preview => self.preview().await?,
            RunMode::Load => {
                let report = self.load()?;
                for outcome in report.sinks.iter().filter(|o| !o.succeeded()) {
                    warn!(sink = %outcome.name, status = ?outcome.status, written = outcome.written);
                }
            }
        }
        info!("{}", messages::FINISHED);
        Ok(())
    }

    async fn preview(&self) -> Result<()> {
        let generator = EventGenerator::new(self.settings.events)?;
        let preview = ChaosPreview::new(
            self.settings.preview.event_count,
            Duration::from_millis(self.settings.preview.pause_ms),
        );
        let mut rng = self.settings.rng();
        let mut sink = JsonLinesEventSink::new(io::stdout());

        preview.run(&generator, &mut rng, &mut sink).await?;
        Ok(())
    }

    fn load(&self) -> Result<LoadReport> {
        let load = &self.settings.load;
        let run = LoadRun::new(
            self.settings.record_generator()?,
            load.batch_size,
            load.progress_interval,
        );
        let mut files: Vec<TargetFileSink> = load
            .targets
            .iter()
            .map(|&target| TargetFileSink::new(&load.output_dir, target))
            .collect();
        let mut sinks: Vec<&mut dyn RecordSink> = files
            .iter_mut()
            .map(|sink| sink as &mut dyn RecordSink)
            .collect();

        let mut rng = self.settings.rng();
        run.execute(&mut rng, &mut sinks)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }
}
