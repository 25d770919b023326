//! The logger facade
//!
//! A [`Logger`] is built once from [`LoggerOptions`] and then used through its
//! five severity methods or the crate's logging macros. Every call runs to
//! completion on the caller's thread: filter, render, terminal mirror, then
//! the segment streams.
//!
//! Writing takes `&mut self`. The logger keeps no lock of its own around its
//! rotation state, so sharing one between threads means wrapping it in a
//! `Mutex` (or giving each thread its own logger with its own prefix).

use std::fmt;

use chrono::{DateTime, Local};

use crate::caller::CallSite;
use crate::config::{LoggerConfig, LoggerOptions};
use crate::error::Result;
use crate::record::LogRecord;
use crate::segment::SegmentHandle;
use crate::severity::{should_emit, Severity};
use crate::terminal::TerminalSink;
use crate::writer::DualStreamWriter;

/// Source of the current time for timestamps and period suffixes
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Leveled logger writing to the terminal and to rotating segment files
pub struct Logger {
    config: LoggerConfig,
    terminal: Option<TerminalSink>,
    files: Option<DualStreamWriter>,
    clock: Clock,
}

impl Logger {
    /// Build a logger that mirrors to standard output when the terminal is enabled
    pub fn new(options: LoggerOptions) -> Result<Self> {
        Self::with_terminal(options, TerminalSink::stdout())
    }

    /// Build a logger with a custom terminal sink
    ///
    /// The sink is dropped unused if the options disable the terminal.
    pub fn with_terminal(options: LoggerOptions, terminal: TerminalSink) -> Result<Self> {
        Self::with_clock(options, terminal, Box::new(Local::now))
    }

    /// Build a logger reading time from `clock`
    ///
    /// Construction fails if no output ends up enabled or if the first
    /// segments cannot be opened; no half-built logger is returned.
    pub fn with_clock(
        options: LoggerOptions,
        terminal: TerminalSink,
        clock: Clock,
    ) -> Result<Self> {
        let config = LoggerConfig::from_options(options)?;

        let files = if config.enable_file {
            let writer = DualStreamWriter::open(&config, &clock())?;
            tracing::info!("Logging to {}", writer.log_segment().path().display());
            Some(writer)
        } else {
            None
        };

        let terminal = config.enable_terminal.then_some(terminal);

        Ok(Self {
            config,
            terminal,
            files,
            clock,
        })
    }

    /// The resolved configuration
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Whether a record of `severity` would be emitted
    pub fn enabled(&self, severity: Severity) -> bool {
        should_emit(severity, self.config.threshold)
    }

    /// Log a record at `severity` attributed to `site`
    ///
    /// Sub-threshold records return `Ok(())` without doing anything. A
    /// terminal write failure does not stop the file write; the first error
    /// encountered is returned.
    pub fn log(
        &mut self,
        severity: Severity,
        site: CallSite,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        if !self.enabled(severity) {
            return Ok(());
        }

        let now = (self.clock)();
        let line = LogRecord::new(now, site, severity, args.to_string()).render();

        let terminal = match self.terminal.as_mut() {
            Some(terminal) => terminal.write_line(&line),
            None => Ok(()),
        };

        if let Some(files) = self.files.as_mut() {
            files.write(&line, severity, &now)?;
        }

        terminal
    }

    /// Log at DEBUG
    ///
    /// File and line come from the caller. The function name cannot be
    /// recovered from a method call and is written as `unknown`; the
    /// [`debug!`](crate::debug) family of macros records it.
    #[track_caller]
    pub fn debug(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Severity::Debug, CallSite::caller(), args)
    }

    /// Log at INFO; see [`Logger::debug`] for how the call site is reported
    #[track_caller]
    pub fn info(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Severity::Info, CallSite::caller(), args)
    }

    /// Log at WARN; see [`Logger::debug`] for how the call site is reported
    #[track_caller]
    pub fn warn(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Severity::Warn, CallSite::caller(), args)
    }

    /// Log at ERROR; see [`Logger::debug`] for how the call site is reported
    #[track_caller]
    pub fn error(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Severity::Error, CallSite::caller(), args)
    }

    /// Log at FATAL. This is only a severity; the process keeps running.
    ///
    /// The call site is reported as for [`Logger::debug`].
    #[track_caller]
    pub fn fatal(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Severity::Fatal, CallSite::caller(), args)
    }

    /// Flush the terminal and both segment streams
    pub fn flush(&mut self) -> Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.flush()?;
        }
        if let Some(files) = self.files.as_mut() {
            files.flush()?;
        }
        Ok(())
    }

    /// Active primary segment, if file output is enabled
    pub fn log_segment(&self) -> Option<&SegmentHandle> {
        self.files.as_ref().map(DualStreamWriter::log_segment)
    }

    /// Active error segment, if file output is enabled
    pub fn err_segment(&self) -> Option<&SegmentHandle> {
        self.files.as_ref().map(DualStreamWriter::err_segment)
    }
}
