//! Application services and run orchestration
//!
//! This module contains the thin callers that drive the generators into
//! sinks: the load run, the chaos preview, and the application that picks
//! between them.

pub mod app;
pub mod load_run;
pub mod preview;

pub use app::Application;
pub use load_run::{LoadReport, LoadRun, SinkOutcome, SinkStatus};
pub use preview::ChaosPreview;
