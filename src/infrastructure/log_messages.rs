//! Log message constants for the application layer
//!
//! Messages carry no placeholders; variable parts are attached as structured
//! `tracing` fields.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting chaos load generator";
    pub const CONFIG_LOADED: &str = "Configuration loaded";
    pub const FINISHED: &str = "Run complete";
}

/// Load run messages
pub mod load {
    pub const SETUP_STARTED: &str = "Setting up load targets";
    pub const SINK_READY: &str = "Load target ready";
    pub const SINK_SETUP_FAILED: &str = "Load target setup failed";
    pub const RUN_STARTED: &str = "Starting load run";
    pub const PROGRESS: &str = "Inserted records";
    pub const SINK_WRITE_FAILED: &str = "Load target write failed; skipping it for the rest of the run";
    pub const SINK_FINISH_FAILED: &str = "Load target failed to finish";
    pub const RUN_COMPLETED: &str = "Load complete";
}

/// Chaos preview messages
pub mod preview {
    pub const STARTED: &str = "Starting chaos generator preview";
    pub const EVENT_EMITTED: &str = "Chaos event emitted";
    pub const COMPLETED: &str = "Chaos preview complete";
}
