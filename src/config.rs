//! Logger configuration
//!
//! [`LoggerOptions`] holds what the caller asked for, every field optional,
//! and can be built in code or loaded from a TOML file. [`LoggerConfig`] is
//! the resolved, validated and immutable form the logger runs on.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::severity::Severity;

/// Calendar granularity embedded in segment file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPeriod {
    /// `yyyyMMdd`
    Day,
    /// `yyyyMM`
    Month,
}

impl RotationPeriod {
    /// strftime pattern for this period
    pub fn pattern(&self) -> &'static str {
        match self {
            RotationPeriod::Day => "%Y%m%d",
            RotationPeriod::Month => "%Y%m",
        }
    }

    /// Period suffix for a segment opened at `now`
    pub fn suffix(&self, now: &DateTime<Local>) -> String {
        now.format(self.pattern()).to_string()
    }
}

/// Caller-supplied options
///
/// Leaving both `prefix` and `directory` unset disables file output:
/// - prefix set, directory unset: segments go to the current directory
/// - prefix unset, directory set: segments go to `directory` with no prefix
/// - both set: segments go to `directory` with the prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Minimum severity to emit (default: debug)
    pub level: Option<Severity>,

    /// Mirror every line to standard output (default: true)
    pub terminal: Option<bool>,

    /// Directory holding the segment files
    pub directory: Option<PathBuf>,

    /// File name prefix of every segment
    pub prefix: Option<String>,

    /// Byte size at which a segment is rotated (default: 10 MiB)
    pub max_segment_bytes: Option<u64>,

    /// Calendar period used in segment names (default: day)
    pub rotation_period: Option<RotationPeriod>,
}

impl LoggerOptions {
    /// Create empty options; every field falls back to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadOptions {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Set the minimum severity
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Enable or disable the terminal mirror
    pub fn with_terminal(mut self, enabled: bool) -> Self {
        self.terminal = Some(enabled);
        self
    }

    /// Set the segment directory
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Set the segment file name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the segment size limit in bytes
    pub fn with_max_segment_bytes(mut self, bytes: u64) -> Self {
        self.max_segment_bytes = Some(bytes);
        self
    }

    /// Set the calendar period used in segment names
    pub fn with_rotation_period(mut self, period: RotationPeriod) -> Self {
        self.rotation_period = Some(period);
        self
    }
}

pub fn default_level() -> Severity {
    Severity::Debug
}

pub fn default_terminal() -> bool {
    true
}

pub fn default_max_segment_bytes() -> u64 {
    10 * 1024 * 1024
}

pub fn default_rotation_period() -> RotationPeriod {
    RotationPeriod::Day
}

/// Resolved logger configuration, fixed for the logger's lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub threshold: Severity,
    pub enable_terminal: bool,
    pub enable_file: bool,
    /// Empty when no prefix was given
    pub file_prefix: String,
    /// Empty (current directory) when no directory was given
    pub directory: PathBuf,
    pub max_segment_bytes: u64,
    pub rotation_period: RotationPeriod,
}

impl LoggerConfig {
    /// Apply defaults to `options` and validate the result
    ///
    /// Fails when neither terminal nor file output ends up enabled, or when
    /// the segment size limit is zero.
    pub fn from_options(options: LoggerOptions) -> Result<Self> {
        let enable_file = options.prefix.is_some() || options.directory.is_some();
        let enable_terminal = options.terminal.unwrap_or_else(default_terminal);

        if !enable_file && !enable_terminal {
            return Err(Error::Configuration(
                "no log output enabled: set a prefix or directory, or enable the terminal"
                    .to_string(),
            ));
        }

        let max_segment_bytes = options
            .max_segment_bytes
            .unwrap_or_else(default_max_segment_bytes);
        if max_segment_bytes == 0 {
            return Err(Error::Configuration(
                "max_segment_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            threshold: options.level.unwrap_or_else(default_level),
            enable_terminal,
            enable_file,
            file_prefix: options.prefix.unwrap_or_default(),
            directory: options.directory.unwrap_or_default(),
            max_segment_bytes,
            rotation_period: options
                .rotation_period
                .unwrap_or_else(default_rotation_period),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_terminal_only() {
        let config = LoggerConfig::from_options(LoggerOptions::new()).unwrap();
        assert_eq!(config.threshold, Severity::Debug);
        assert!(config.enable_terminal);
        assert!(!config.enable_file);
        assert_eq!(config.max_segment_bytes, 10 * 1024 * 1024);
        assert_eq!(config.rotation_period, RotationPeriod::Day);
    }

    #[test]
    fn test_prefix_or_directory_enables_files() {
        let with_prefix =
            LoggerConfig::from_options(LoggerOptions::new().with_prefix("svc")).unwrap();
        assert!(with_prefix.enable_file);
        assert_eq!(with_prefix.directory, PathBuf::new());

        let with_dir =
            LoggerConfig::from_options(LoggerOptions::new().with_directory("logs")).unwrap();
        assert!(with_dir.enable_file);
        assert_eq!(with_dir.file_prefix, "");
    }

    #[test]
    fn test_no_output_is_rejected() {
        let result = LoggerConfig::from_options(LoggerOptions::new().with_terminal(false));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_terminal_disabled_with_files_is_accepted() {
        let config = LoggerConfig::from_options(
            LoggerOptions::new().with_terminal(false).with_prefix("svc"),
        )
        .unwrap();
        assert!(!config.enable_terminal);
        assert!(config.enable_file);
    }

    #[test]
    fn test_zero_segment_size_is_rejected() {
        let result = LoggerConfig::from_options(
            LoggerOptions::new().with_prefix("svc").with_max_segment_bytes(0),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_options_from_toml() {
        let options = LoggerOptions::from_toml_str(
            r#"
            level = "info"
            terminal = false
            directory = "/var/log/svc"
            prefix = "svc"
            max_segment_bytes = 4096
            rotation_period = "month"
            "#,
        )
        .unwrap();

        assert_eq!(options.level, Some(Severity::Info));
        assert_eq!(options.terminal, Some(false));
        assert_eq!(options.directory, Some(PathBuf::from("/var/log/svc")));
        assert_eq!(options.prefix.as_deref(), Some("svc"));
        assert_eq!(options.max_segment_bytes, Some(4096));
        assert_eq!(options.rotation_period, Some(RotationPeriod::Month));
    }

    #[test]
    fn test_partial_toml_leaves_rest_unset() {
        let options = LoggerOptions::from_toml_str("prefix = \"svc\"").unwrap();
        assert_eq!(options, LoggerOptions::new().with_prefix("svc"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = LoggerOptions::from_toml_str("level = \"loud\"");
        assert!(matches!(result, Err(Error::ParseOptions(_))));
    }

    #[test]
    fn test_load_options_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logger.toml");
        std::fs::write(&path, "level = \"error\"\n").unwrap();

        let options = LoggerOptions::load(&path).unwrap();
        assert_eq!(options.level, Some(Severity::Error));
    }

    #[test]
    fn test_load_missing_options_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = LoggerOptions::load(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::ReadOptions { .. })));
    }

    #[test]
    fn test_period_suffix() {
        let now = Local.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(RotationPeriod::Day.suffix(&now), "20240115");
        assert_eq!(RotationPeriod::Month.suffix(&now), "202401");
    }
}
