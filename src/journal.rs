use log::warn;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::SdgError;

/// Buffered JSONL journal for session records such as
/// [`StatusEvent`](crate::actuator::StatusEvent)s.
///
/// Entries are buffered in memory and appended to the file one JSON object
/// per line whenever the buffer fills or [`Journal::flush`] is called.
/// Repeated flush failures are counted and give up after a cap, so a broken
/// disk does not turn every instrument move into an error.
#[derive(Debug)]
pub struct Journal<T: Serialize> {
    buffer: Vec<T>,
    buffer_size: usize,
    file_path: PathBuf,
    flush_failures: usize,
    max_flush_failures: usize,
}

impl<T: Serialize> Journal<T> {
    pub fn new<P: Into<PathBuf>>(file_path: P, buffer_size: usize) -> Self {
        let mut path = file_path.into();
        if path.extension() != Some(std::ffi::OsStr::new("jsonl")) {
            path.set_extension("jsonl");
        }

        Self {
            buffer: Vec::with_capacity(buffer_size),
            buffer_size,
            file_path: path,
            flush_failures: 0,
            max_flush_failures: 10,
        }
    }

    pub fn add(&mut self, entry: T) -> Result<(), SdgError> {
        self.buffer.push(entry);

        if self.buffer.len() >= self.buffer_size {
            self.flush()?;
        }

        Ok(())
    }

    /// Append all buffered entries to the journal file.
    pub fn flush(&mut self) -> Result<(), SdgError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        if self.flush_failures >= self.max_flush_failures {
            warn!(
                "Journal {} disabled after {} flush failures",
                self.file_path.display(),
                self.flush_failures
            );
            self.buffer.clear();
            return Ok(());
        }

        let result = (|| -> Result<(), SdgError> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            for entry in &self.buffer {
                let line = serde_json::to_string(entry)
                    .map_err(|e| SdgError::Type(format!("journal serialization: {e}")))?;
                writeln!(file, "{line}")?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                self.buffer.clear();
                self.flush_failures = 0;
                Ok(())
            }
            Err(e) => {
                self.flush_failures += 1;
                Err(e)
            }
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }
}

impl<T: Serialize> Drop for Journal<T> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
