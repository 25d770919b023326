//! Log records and their rendered line form

use chrono::{DateTime, Local};

use crate::caller::CallSite;
use crate::severity::{rank_name, Severity};

/// Timestamp layout at the start of every line
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H:%M:%S";

/// A single log record, alive only for one logging call
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// When the record was created
    pub timestamp: DateTime<Local>,
    /// Where the record was logged from
    pub site: CallSite,
    /// Record severity
    pub severity: Severity,
    /// Payload, written verbatim
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the given time
    pub fn new(
        timestamp: DateTime<Local>,
        site: CallSite,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            site,
            severity,
            message: message.into(),
        }
    }

    /// Render the record as one line, without the trailing newline
    ///
    /// Format: `[yyyyMMdd-HH:mm:ss][file:line][function][LEVEL] - message`
    pub fn render(&self) -> String {
        format!(
            "[{}]{}[{}] - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.site,
            rank_name(self.severity.rank()),
            self.message
        )
    }
}
