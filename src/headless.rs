use crate::config::DisplayConfig;
use crate::trace::Trace;
use anyhow::Result;
use std::path::PathBuf;
use tapmeasure_session::{MeasurementSession, SharedSession};
use tapmeasure_testkit::{EventRecord, JsonlSink};
use tapmeasure_tracking::{FrameOutcome, TrackingSource};
use tracing::info;

pub struct HeadlessConfig {
    pub trace: PathBuf,
    pub display: DisplayConfig,
    pub event_log: Option<PathBuf>,
    pub max_frames: Option<u64>,
}

/// What a replay produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub hits: u64,
    pub misses: u64,
    pub changes: u64,
    pub is_measuring: bool,
    pub distance_text: String,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let mut trace = Trace::from_path(&cfg.trace, cfg.display.hit_test_options())?;

    let shared = SharedSession::new(MeasurementSession::with_formatter(cfg.display.formatter()));
    let changes = shared.subscribe();
    trace
        .tracker_mut()
        .subscribe(Box::new(shared.position_sink()));

    let mut sink = match cfg.event_log.as_deref() {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let mut summary = RunSummary {
        frames: 0,
        hits: 0,
        misses: 0,
        changes: 0,
        is_measuring: false,
        distance_text: shared.current_distance_text(),
    };

    let max_frames = cfg.max_frames.unwrap_or(u64::MAX);
    while summary.frames < max_frames {
        let tick = trace.tracker_mut().tick();
        shared.advance_tick(tick);
        if trace.toggles_at(tick.0 as usize) {
            shared.toggle_measuring();
        }

        match trace.tracker_mut().step() {
            Some(FrameOutcome::Hit(_)) => summary.hits += 1,
            Some(FrameOutcome::Miss) => summary.misses += 1,
            None => break,
        }
        summary.frames += 1;

        for snapshot in changes.try_iter() {
            summary.changes += 1;
            info!(
                tick = snapshot.tick.0,
                kind = snapshot.kind.as_str(),
                measuring = snapshot.is_measuring(),
                "{}",
                snapshot.distance_text
            );
            if let Some(sink) = sink.as_mut() {
                sink.write(&EventRecord {
                    tick: snapshot.tick,
                    kind: snapshot.kind.as_str(),
                    payload: &snapshot.distance_text,
                })?;
            }
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    summary.is_measuring = shared.is_measuring();
    summary.distance_text = shared.current_distance_text();
    info!(
        frames = summary.frames,
        hits = summary.hits,
        misses = summary.misses,
        seconds = summary.frames as f64 / f64::from(trace.fps),
        "replay finished"
    );
    Ok(summary)
}
