//! Access log writer module
//!
//! Thread-safe access log output to stderr or an append-only file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing::warn;

/// Global access log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
}

/// Thread-safe access log writer
pub struct LogWriter {
    target: LogTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>) -> io::Result<Self> {
        let target = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };
        Ok(Self { target })
    }

    /// Write one access log line; a failing sink is reported, not fatal
    pub fn write_access(&self, message: &str) {
        if let Err(e) = self.try_write(message) {
            warn!(error = %e, "Dropped access log line");
        }
    }

    fn try_write(&self, message: &str) -> io::Result<()> {
        match &self.target {
            LogTarget::Stderr => writeln!(io::stderr(), "{message}"),
            LogTarget::File(file) => {
                let mut f = file
                    .lock()
                    .map_err(|_| io::Error::other("access log lock poisoned"))?;
                writeln!(f, "{message}")
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global access log writer
///
/// Returns error if the log file cannot be opened or the writer is
/// already initialized.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global access log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
