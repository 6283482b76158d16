//! Chaos Load Generator - synthetic data for vector database benchmarks
//!
//! Generates unit-norm embedding records for seeding vector tables and
//! synthetic SQL Server telemetry ("chaos events") for dashboards and
//! previews. Generators are deterministic given a seeded random source.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::Application;
pub use error::{Error, Result};
