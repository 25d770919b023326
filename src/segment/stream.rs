//! One rotating stream of segment files

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::RotationPeriod;
use crate::error::{Error, Result};

use super::name::{directory_or_current, latest_sequence, segment_name};
use super::rotation::{next_sequence, should_rotate};

/// An open segment file and the bytes it holds
#[derive(Debug)]
pub struct SegmentHandle {
    file: File,
    path: PathBuf,
    name: String,
    period_suffix: String,
    size: u64,
}

impl SegmentHandle {
    /// Open `name` in `directory` for appending, creating it if absent
    fn open(directory: &Path, name: String, period_suffix: String) -> Result<Self> {
        let path = directory.join(&name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::SegmentOpen {
                path: path.clone(),
                source,
            })?;

        // Appending to an existing segment continues its byte count
        let size = file
            .metadata()
            .map_err(|source| Error::SegmentOpen {
                path: path.clone(),
                source,
            })?
            .len();

        tracing::debug!("Opened log segment {} ({} bytes)", path.display(), size);

        Ok(Self {
            file,
            path,
            name,
            period_suffix,
            size,
        })
    }

    /// Append one newline-terminated line
    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        self.file.write_all(&buf).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        self.size += buf.len() as u64;
        Ok(())
    }

    /// Full path of the segment
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the segment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Period suffix the segment was opened under
    pub fn period_suffix(&self) -> &str {
        &self.period_suffix
    }

    /// Bytes in the segment, including any present before it was opened
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// A stream of segments sharing a prefix and extension, rotated by size
///
/// Rotation is checked before every write, so a line is never split across
/// two segments. A segment that is still empty never rotates; a single line
/// larger than the limit is written whole into it instead.
#[derive(Debug)]
pub struct SegmentStream {
    directory: PathBuf,
    prefix: String,
    extension: &'static str,
    period: RotationPeriod,
    max_bytes: u64,
    current: SegmentHandle,
}

impl SegmentStream {
    /// Open the stream's first segment for the period containing `now`
    ///
    /// Creates `directory` if needed. If the generation already has segments
    /// on disk the highest one is reopened for appending, otherwise sequence 1
    /// is created.
    pub fn open(
        directory: &Path,
        prefix: &str,
        extension: &'static str,
        period: RotationPeriod,
        max_bytes: u64,
        now: &DateTime<Local>,
    ) -> Result<Self> {
        let directory = directory_or_current(directory).to_path_buf();
        fs::create_dir_all(&directory).map_err(|source| Error::SegmentOpen {
            path: directory.clone(),
            source,
        })?;

        let period_suffix = period.suffix(now);
        let sequence = starting_sequence(&directory, prefix, &period_suffix, extension)?;
        let name = segment_name(prefix, &period_suffix, sequence, extension);
        let current = SegmentHandle::open(&directory, name, period_suffix)?;

        Ok(Self {
            directory,
            prefix: prefix.to_string(),
            extension,
            period,
            max_bytes,
            current,
        })
    }

    /// Write one line, rotating first if it would overflow the active segment
    pub fn write(&mut self, line: &str, now: &DateTime<Local>) -> Result<()> {
        let incoming = line.len() as u64 + 1;
        if self.current.size > 0 && should_rotate(self.current.size, incoming, self.max_bytes) {
            self.rotate(incoming, now)?;
        }
        self.current.write_line(line)
    }

    /// Replace the active segment with the next one
    ///
    /// The period suffix is taken from `now`. Within the same generation the
    /// sequence is the active segment's plus one. A new generation continues
    /// from its highest segment on disk, moving past it if `incoming` bytes
    /// would overfill it.
    fn rotate(&mut self, incoming: u64, now: &DateTime<Local>) -> Result<()> {
        let next_suffix = self.period.suffix(now);
        let continued = next_sequence(&self.current.name, self.extension)?;

        let next = if next_suffix == self.current.period_suffix {
            let name = segment_name(&self.prefix, &next_suffix, continued, self.extension);
            SegmentHandle::open(&self.directory, name, next_suffix)?
        } else {
            let sequence =
                starting_sequence(&self.directory, &self.prefix, &next_suffix, self.extension)?;
            let name = segment_name(&self.prefix, &next_suffix, sequence, self.extension);
            let resumed = SegmentHandle::open(&self.directory, name, next_suffix.clone())?;
            if resumed.size > 0 && should_rotate(resumed.size, incoming, self.max_bytes) {
                let name = segment_name(&self.prefix, &next_suffix, sequence + 1, self.extension);
                SegmentHandle::open(&self.directory, name, next_suffix)?
            } else {
                resumed
            }
        };

        tracing::info!(
            "Rotated log segment {} ({} bytes) to {}",
            self.current.name,
            self.current.size,
            next.name
        );

        // Dropping the old handle closes it; it receives no further writes
        self.current = next;
        Ok(())
    }

    /// Flush the active segment
    pub fn flush(&mut self) -> Result<()> {
        self.current.file.flush().map_err(|source| Error::Write {
            path: self.current.path.clone(),
            source,
        })
    }

    /// The active segment
    pub fn current(&self) -> &SegmentHandle {
        &self.current
    }
}

fn starting_sequence(
    directory: &Path,
    prefix: &str,
    period_suffix: &str,
    extension: &str,
) -> Result<u64> {
    let sequence = match latest_sequence(directory, prefix, period_suffix, extension)? {
        Some(sequence) => {
            tracing::debug!(
                "Resuming {}{}-{}.{}",
                prefix,
                period_suffix,
                sequence,
                extension
            );
            sequence
        }
        None => 1,
    };
    Ok(sequence)
}
