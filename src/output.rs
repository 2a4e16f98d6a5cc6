//! Shared output sinks.
//!
//! The plugin hands its stdout/stderr destinations to every helm command it
//! runs, so a sink is a cheaply clonable handle to one underlying writer.
//! Clones refer to the same writer; [`Output::same_as`] checks that.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A clonable handle to a writer shared between configuration records.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl Output {
    /// Wrap any writer.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Sink writing to the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Sink writing to the process stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Whether both handles point at the same writer.
    pub fn same_as(&self, other: &Output) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Write `line` followed by a newline, then flush.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.lock()?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, dyn Write + Send + 'static>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("output sink lock poisoned"))
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Output(..)")
    }
}

/// In-memory writer whose clones share one buffer.
///
/// Useful for capturing what was written to an [`Output`].
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
