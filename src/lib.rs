//! seglog - leveled logging to the terminal and to rotating segment files
//!
//! Every record is rendered as one line,
//! `[yyyyMMdd-HH:mm:ss][file:line][function][LEVEL] - message`, mirrored to
//! standard output and appended to `<prefix><period>-<seq>.log`. ERROR and
//! FATAL records are also appended to a parallel `.err` stream. Each stream
//! moves to its next segment when the next line would push it past the size
//! limit.
//!
//! ```rust,no_run
//! use seglog::{Logger, LoggerOptions, RotationPeriod, Severity};
//!
//! # fn main() -> seglog::Result<()> {
//! let mut logger = Logger::new(
//!     LoggerOptions::new()
//!         .with_level(Severity::Info)
//!         .with_directory("./logs")
//!         .with_prefix("svc")
//!         .with_rotation_period(RotationPeriod::Day),
//! )?;
//!
//! seglog::info!(logger, "listening on port {}", 8080)?;
//! logger.error(format_args!("upstream timed out"))?;
//! # Ok(())
//! # }
//! ```

pub mod caller;
pub mod config;
pub mod error;
pub mod logger;
pub mod record;
pub mod segment;
pub mod severity;
pub mod terminal;
pub mod writer;

pub use caller::CallSite;
pub use config::{LoggerConfig, LoggerOptions, RotationPeriod};
pub use error::{Error, Result};
pub use logger::{Clock, Logger};
pub use record::LogRecord;
pub use segment::SegmentHandle;
pub use severity::{should_emit, Severity};
pub use terminal::TerminalSink;

/// Log through `logger` at `severity`, capturing the full call site
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, $crate::call_site!(), format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log at FATAL; does not exit the process
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}
