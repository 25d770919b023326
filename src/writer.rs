//! Primary and error segment streams
//!
//! Every line goes to the primary `.log` stream; ERROR and FATAL lines are
//! also written to the `.err` stream. The two streams rotate independently,
//! so their sequence numbers drift apart as the primary fills faster.

use chrono::{DateTime, Local};

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::segment::{SegmentHandle, SegmentStream, ERR_EXTENSION, LOG_EXTENSION};
use crate::severity::Severity;

/// Owns the primary and error segment streams of one logger
#[derive(Debug)]
pub struct DualStreamWriter {
    log: SegmentStream,
    err: SegmentStream,
}

impl DualStreamWriter {
    /// Open the first segment of both streams
    pub fn open(config: &LoggerConfig, now: &DateTime<Local>) -> Result<Self> {
        let open = |extension: &'static str| {
            SegmentStream::open(
                &config.directory,
                &config.file_prefix,
                extension,
                config.rotation_period,
                config.max_segment_bytes,
                now,
            )
        };

        let log = open(LOG_EXTENSION)?;
        let err = open(ERR_EXTENSION)?;
        Ok(Self { log, err })
    }

    /// Write a rendered line to the streams its severity belongs to
    pub fn write(&mut self, line: &str, severity: Severity, now: &DateTime<Local>) -> Result<()> {
        self.log.write(line, now)?;
        if severity.is_error_class() {
            self.err.write(line, now)?;
        }
        Ok(())
    }

    /// Flush both streams
    pub fn flush(&mut self) -> Result<()> {
        self.log.flush()?;
        self.err.flush()
    }

    /// Active primary segment
    pub fn log_segment(&self) -> &SegmentHandle {
        self.log.current()
    }

    /// Active error segment
    pub fn err_segment(&self) -> &SegmentHandle {
        self.err.current()
    }
}
