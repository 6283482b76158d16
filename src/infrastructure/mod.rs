//! Infrastructure layer for the chaos load generator
//!
//! This module contains the collaborators at the edge of the generators:
//! storage targets, record and event sinks, and log message text.

pub mod log_messages;
pub mod sinks;
pub mod targets;

pub use sinks::*;
pub use targets::LoadTarget;
