//! Validation constants and generation defaults
//!
//! This module centralizes the limits, default ranges and magic numbers used
//! by the generators so configuration defaults and validation agree.

/// Embedding vector constants
pub mod vector {
    /// Default embedding dimension (OpenAI `text-embedding-3-small` size)
    pub const DEFAULT_DIMENSION: usize = 1536;

    /// Largest dimension a pgvector `vector` column accepts
    pub const MAX_DIMENSION: usize = 16_000;

    /// Resample attempts before falling back to the first basis vector
    pub const MAX_RESAMPLE_ATTEMPTS: usize = 8;

    /// Allowed deviation of a generated vector's norm from 1.0
    pub const NORM_TOLERANCE: f64 = 1e-6;
}

/// Chaos event constants
pub mod events {
    /// Relative weight of query events (3 of every 4)
    pub const DEFAULT_QUERY_WEIGHT: u32 = 3;

    /// Relative weight of error events (1 of every 4)
    pub const DEFAULT_ERROR_WEIGHT: u32 = 1;

    pub const DURATION_MS_MIN: u32 = 100;
    pub const DURATION_MS_MAX: u32 = 15_000;

    /// CPU time is this fraction of the query duration
    pub const CPU_FRACTION_MIN: f64 = 0.5;
    pub const CPU_FRACTION_MAX: f64 = 0.9;

    pub const LOGICAL_READS_MIN: u32 = 1_000;
    pub const LOGICAL_READS_MAX: u32 = 500_000;

    pub const PRICE_MIN: u32 = 10;
    pub const PRICE_MAX: u32 = 1_000;

    pub const RECORD_ID_MIN: u32 = 1;
    pub const RECORD_ID_MAX: u32 = 10_000;

    pub const PROCESS_ID_MIN: u32 = 50;
    pub const PROCESS_ID_MAX: u32 = 150;

    /// Wall-clock format of event timestamps (second precision)
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Format of dates interpolated into SQL text
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Document text constants
pub mod text {
    pub const DEFAULT_SENTENCES: usize = 3;
    pub const MAX_SENTENCES: usize = 100;
    pub const MIN_WORDS_PER_SENTENCE: usize = 4;
    pub const MAX_WORDS_PER_SENTENCE: usize = 10;
}

/// Load run constants
pub mod load {
    pub const DEFAULT_BATCH_SIZE: u64 = 100;
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10;
    pub const DEFAULT_OUTPUT_DIR: &str = "load-output";
    pub const DEFAULT_TARGETS: &[&str] = &["sql2025", "sql2022", "postgres"];
}

/// Chaos preview constants
pub mod preview {
    pub const DEFAULT_EVENT_COUNT: u64 = 5;
    pub const DEFAULT_PAUSE_MS: u64 = 500;
}
