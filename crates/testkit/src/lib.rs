#![warn(missing_docs)]
//! Event stream surfaces for headless runs and tests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tapmeasure_core::FrameTick;

/// One measurement change captured by a headless run.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Frame when the change occurred.
    pub tick: FrameTick,
    /// Change label (`toggle` or `candidate`).
    pub kind: &'a str,
    /// Distance text after the change.
    pub payload: &'a str,
}

/// Owned form of [`EventRecord`], as read back from disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordedEvent {
    /// Frame when the change occurred.
    pub tick: FrameTick,
    /// Change label.
    pub kind: String,
    /// Distance text after the change.
    pub payload: String,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered events to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every event from a JSONL log written by [`JsonlSink`].
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedEvent>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open event log {}", path.display()))?;
    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid event", path.display(), index + 1))?;
        events.push(event);
    }
    Ok(events)
}
