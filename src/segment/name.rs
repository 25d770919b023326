//! Segment file naming
//!
//! A segment is named `<prefix><period>-<sequence>.<ext>`, for example
//! `Svc20240115-3.log`. Segments sharing prefix and period form a generation.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Extension of the primary stream's segments
pub const LOG_EXTENSION: &str = "log";

/// Extension of the error stream's segments
pub const ERR_EXTENSION: &str = "err";

/// Build a segment file name
pub fn segment_name(prefix: &str, period_suffix: &str, sequence: u64, extension: &str) -> String {
    format!("{}{}-{}.{}", prefix, period_suffix, sequence, extension)
}

/// Parse the sequence number out of a segment file name
///
/// Only the trailing `-<N>.<extension>` is considered, so a prefix that
/// itself contains dashes or digits does not confuse the parse.
pub fn parse_sequence(file_name: &str, extension: &str) -> Result<u64> {
    try_parse_sequence(file_name, extension).ok_or_else(|| Error::MalformedSegmentName {
        name: file_name.to_string(),
    })
}

fn try_parse_sequence(file_name: &str, extension: &str) -> Option<u64> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    let (_, digits) = stem.rsplit_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Find the highest sequence already on disk for a generation
///
/// Returns `None` when the directory is missing or holds no segment of the
/// generation. Any other failure to list the directory is an error.
pub fn latest_sequence(
    directory: &Path,
    prefix: &str,
    period_suffix: &str,
    extension: &str,
) -> Result<Option<u64>> {
    let generation = format!("{}{}-", prefix, period_suffix);
    let directory = directory_or_current(directory);
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::SegmentOpen {
                path: directory.to_path_buf(),
                source,
            })
        }
    };

    let latest = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            let rest = name.strip_prefix(&generation)?;
            // The generation's own segments have nothing but digits before the extension
            let digits = rest.strip_suffix(extension)?.strip_suffix('.')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<u64>().ok()
        })
        .max();
    Ok(latest)
}

pub(crate) fn directory_or_current(directory: &Path) -> &Path {
    if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_segment_name() {
        assert_eq!(segment_name("Svc", "20240115", 3, LOG_EXTENSION), "Svc20240115-3.log");
        assert_eq!(segment_name("", "202401", 1, ERR_EXTENSION), "202401-1.err");
    }

    #[test]
    fn test_parse_sequence_recovers_name() {
        let name = segment_name("Svc", "20240115", 3, LOG_EXTENSION);
        assert_eq!(parse_sequence(&name, LOG_EXTENSION).unwrap(), 3);
    }

    #[test]
    fn test_parse_sequence_uses_trailing_suffix() {
        assert_eq!(parse_sequence("1-PrefixTest20201231-1.log", "log").unwrap(), 1);
        assert_eq!(parse_sequence("-1PrefixTest20201231-2.log", "log").unwrap(), 2);
        assert_eq!(parse_sequence("PrefixTest20201231-17.log", "log").unwrap(), 17);
    }

    #[test]
    fn test_parse_sequence_is_extension_specific() {
        assert_eq!(parse_sequence("Svc20240115-4.err", ERR_EXTENSION).unwrap(), 4);
        assert!(matches!(
            parse_sequence("Svc20240115-4.err", LOG_EXTENSION),
            Err(Error::MalformedSegmentName { .. })
        ));
    }

    #[test]
    fn test_parse_sequence_rejects_malformed() {
        for name in ["Svc.log", "Svc-.log", "Svc-x1.log", "Svc-1log", "Svc-1.log.bak"] {
            assert!(
                matches!(
                    parse_sequence(name, LOG_EXTENSION),
                    Err(Error::MalformedSegmentName { .. })
                ),
                "{} should not parse",
                name
            );
        }
    }

    #[test]
    fn test_latest_sequence() {
        let temp_dir = TempDir::new().unwrap();
        for name in [
            "Svc20240115-1.log",
            "Svc20240115-2.log",
            "Svc20240115-10.log",
            "Svc20240115-11.err",
            "Svc20240114-30.log",
            "Svc20240115-1.log.old",
            "Other20240115-50.log",
        ] {
            File::create(temp_dir.path().join(name)).unwrap();
        }

        assert_eq!(
            latest_sequence(temp_dir.path(), "Svc", "20240115", LOG_EXTENSION).unwrap(),
            Some(10)
        );
        assert_eq!(
            latest_sequence(temp_dir.path(), "Svc", "20240115", ERR_EXTENSION).unwrap(),
            Some(11)
        );
        assert_eq!(
            latest_sequence(temp_dir.path(), "Svc", "20240116", LOG_EXTENSION).unwrap(),
            None
        );
    }

    #[test]
    fn test_latest_sequence_missing_directory() {
        let path = Path::new("/nonexistent/path/for/testing");
        assert_eq!(
            latest_sequence(path, "Svc", "20240115", LOG_EXTENSION).unwrap(),
            None
        );
    }

    #[test]
    fn test_latest_sequence_unreadable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_dir = temp_dir.path().join("Svc20240115-1.log");
        File::create(&not_a_dir).unwrap();

        let result = latest_sequence(&not_a_dir, "Svc", "20240115", LOG_EXTENSION);
        assert!(matches!(result, Err(Error::SegmentOpen { .. })));
    }
}
