//! Terminal mirror of rendered log lines

use std::io::{self, Write};

use crate::error::{Error, Result};

/// Where the terminal copy of each line goes, standard output by default
pub struct TerminalSink {
    out: Box<dyn Write + Send>,
}

impl TerminalSink {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Sink writing to an arbitrary target
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Write one line followed by a newline
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line).map_err(Error::Terminal)
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(Error::Terminal)
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::stdout()
    }
}

/// In-memory terminal shared between a sink and a test
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
