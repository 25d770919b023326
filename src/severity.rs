//! Severity levels and the threshold filter

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a log record, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric rank used for threshold comparison
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Look up a severity by its rank
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Get the upper-case name written into log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Check if records of this severity also go to the error stream
    pub fn is_error_class(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw rank as a severity name, `UNKNOWN` when out of range
pub fn rank_name(rank: u8) -> &'static str {
    Severity::from_rank(rank).map_or("UNKNOWN", |s| s.as_str())
}

/// Whether a record at `level` passes a logger configured with `threshold`
pub fn should_emit(level: Severity, threshold: Severity) -> bool {
    level >= threshold
}
