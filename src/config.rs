use crate::domain::validation_constants::{load, preview, text, vector};
use crate::domain::{
    Dimension, EventProfile, ParagraphGenerator, RecordGenerator, SentenceCount, VectorGenerator,
};
use crate::infrastructure::targets::LoadTarget;
use crate::{Error, Result};
use config::{Config, ConfigError, Environment, File};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ENV_PREFIX: &str = "CHAOS_LOADGEN";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub run: RunSettings,
    pub vectors: VectorSettings,
    pub events: EventProfile,
    pub text: TextSettings,
    pub load: LoadSettings,
    pub preview: PreviewSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Print a handful of chaos events
    Preview,
    /// Generate embedding records into every load target
    Load,
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "preview" => Ok(Self::Preview),
            "load" => Ok(Self::Load),
            other => Err(Error::invalid_configuration(format!(
                "run.mode: unknown mode '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunSettings {
    pub mode: RunMode,
    /// Fixed seed for reproducible output; entropy-seeded when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorSettings {
    pub dimension: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TextSettings {
    pub sentences: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoadSettings {
    pub batch_size: u64,
    pub progress_interval: u64,
    pub output_dir: PathBuf,
    pub targets: Vec<LoadTarget>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewSettings {
    pub event_count: u64,
    pub pause_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    /// Load settings from `./config` and the environment
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load settings from files under `config_dir` and the environment
    pub fn load_from(config_dir: &Path) -> std::result::Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let targets: Vec<&str> = load::DEFAULT_TARGETS.to_vec();

        let config = Config::builder()
            // Start with default values
            .set_default("run.mode", "preview")?
            .set_default("vectors.dimension", vector::DEFAULT_DIMENSION as i64)?
            .set_default("text.sentences", text::DEFAULT_SENTENCES as i64)?
            .set_default("load.batch_size", load::DEFAULT_BATCH_SIZE as i64)?
            .set_default("load.progress_interval", load::DEFAULT_PROGRESS_INTERVAL as i64)?
            .set_default("load.output_dir", load::DEFAULT_OUTPUT_DIR)?
            .set_default("load.targets", targets)?
            .set_default("preview.event_count", preview::DEFAULT_EVENT_COUNT as i64)?
            .set_default("preview.pause_ms", preview::DEFAULT_PAUSE_MS as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?;
        let config = event_defaults(config, &EventProfile::default())?
            // Add configuration file if it exists
            .add_source(File::from(config_dir.join("default")).required(false))
            .add_source(File::from(config_dir.join(&environment)).required(false))
            .add_source(File::from(config_dir.join("local")).required(false))
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("load.targets")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn dimension(&self) -> Result<Dimension> {
        Dimension::from_len(self.vectors.dimension)
    }

    pub fn record_generator(&self) -> Result<RecordGenerator> {
        let sentences = SentenceCount::try_new(self.text.sentences).map_err(|_| {
            Error::invalid_configuration(format!(
                "text.sentences: expected 1..={}, got {}",
                text::MAX_SENTENCES,
                self.text.sentences
            ))
        })?;
        Ok(RecordGenerator::new(
            ParagraphGenerator::new(sentences),
            VectorGenerator::new(self.dimension()?),
        ))
    }

    /// Random source for this run
    pub fn rng(&self) -> StdRng {
        match self.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

fn event_defaults(
    builder: Builder,
    profile: &EventProfile,
) -> std::result::Result<Builder, ConfigError> {
    let ranges = [
        ("duration_ms", profile.duration_ms),
        ("logical_reads", profile.logical_reads),
        ("price", profile.price),
        ("record_id", profile.record_id),
        ("process_id", profile.process_id),
    ];

    let mut builder = builder
        .set_default("events.query_weight", i64::from(profile.query_weight))?
        .set_default("events.error_weight", i64::from(profile.error_weight))?
        .set_default("events.cpu_fraction.min", profile.cpu_fraction.min)?
        .set_default("events.cpu_fraction.max", profile.cpu_fraction.max)?;
    for (name, range) in ranges {
        builder = builder
            .set_default(format!("events.{name}.min"), i64::from(range.min))?
            .set_default(format!("events.{name}.max"), i64::from(range.max))?;
    }
    Ok(builder)
}
