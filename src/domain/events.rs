//! Synthetic SQL Server telemetry events
//!
//! A chaos event is either a slow query or an error log entry. Both serialize
//! as flat JSON objects carrying a `type` discriminator.

use crate::domain::validation_constants::events::TIMESTAMP_FORMAT;
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock instant with second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EventTimestamp(DateTime<Utc>);

impl EventTimestamp {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for EventTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at.with_nanosecond(0).unwrap_or(at))
    }
}

impl fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl From<EventTimestamp> for String {
    fn from(timestamp: EventTimestamp) -> Self {
        timestamp.to_string()
    }
}

impl TryFrom<String> for EventTimestamp {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let naive = NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)?;
        Ok(Self(naive.and_utc()))
    }
}

/// SQL Server wait statistic dominating a slow query
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaitType {
    /// Data page reads from disk
    #[serde(rename = "PAGEIOLATCH_SH")]
    #[display("PAGEIOLATCH_SH")]
    PageIoLatchShared,
    /// Blocked on an intent-exclusive lock
    #[serde(rename = "LCK_M_IX")]
    #[display("LCK_M_IX")]
    LockIntentExclusive,
    /// Parallel exchange
    #[serde(rename = "CXPACKET")]
    #[display("CXPACKET")]
    CxPacket,
    /// CPU pressure
    #[serde(rename = "SOS_SCHEDULER_YIELD")]
    #[display("SOS_SCHEDULER_YIELD")]
    SchedulerYield,
    /// Transaction log flushes
    #[serde(rename = "WRITELOG")]
    #[display("WRITELOG")]
    WriteLog,
}

impl WaitType {
    pub const ALL: [Self; 5] = [
        Self::PageIoLatchShared,
        Self::LockIntentExclusive,
        Self::CxPacket,
        Self::SchedulerYield,
        Self::WriteLog,
    ];
}

/// SQL Server error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    /// General errors the user can correct
    General = 16,
    /// Insufficient resources
    InsufficientResources = 17,
    /// Non-configurable engine limit exceeded
    EngineLimit = 19,
    /// Fatal error in the current process
    FatalProcess = 20,
}

impl Severity {
    pub const ALL: [Self; 4] = [
        Self::General,
        Self::InsufficientResources,
        Self::EngineLimit,
        Self::FatalProcess,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.level() == level)
            .ok_or_else(|| format!("unsupported severity level {level}"))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// A slow query captured by the monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEvent {
    pub timestamp: EventTimestamp,
    pub duration_ms: u32,
    pub cpu_time_ms: u32,
    pub logical_reads: u32,
    pub wait_type: WaitType,
    pub sql_text: String,
}

/// An entry from the SQL Server error log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub timestamp: EventTimestamp,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChaosEvent {
    #[serde(rename = "QUERY")]
    Query(QueryEvent),
    #[serde(rename = "ERROR")]
    Error(ErrorEvent),
}

impl ChaosEvent {
    pub fn timestamp(&self) -> EventTimestamp {
        match self {
            Self::Query(event) => event.timestamp,
            Self::Error(event) => event.timestamp,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Discriminator written to the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Query(_) => "QUERY",
            Self::Error(_) => "ERROR",
        }
    }
}
