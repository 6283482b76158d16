use crate::domain::templates::TemplateId;
use thiserror::Error;

/// Chaos load generator error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration value: {field}")]
    InvalidConfiguration { field: String },

    #[error("Invalid vector dimension: {0}")]
    InvalidDimension(usize),

    #[error("Invalid event weights: {0}")]
    InvalidWeights(#[from] rand::distr::weighted::Error),

    #[error("Template {template:?} is invalid: {reason}")]
    Template { template: TemplateId, reason: String },

    #[error("Sink '{sink}' failed: {message}")]
    Sink { sink: String, message: String },

    #[error("Every sink failed; no records were written")]
    AllSinksFailed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_configuration(field: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
        }
    }

    pub fn template(template: TemplateId, reason: impl Into<String>) -> Self {
        Self::Template {
            template,
            reason: reason.into(),
        }
    }

    pub fn sink(sink: impl Into<String>, message: impl ToString) -> Self {
        Self::Sink {
            sink: sink.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
