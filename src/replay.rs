//! Replay driver
//!
//! Feeds a timestamped event stream into a [`Screen`] and captures a
//! snapshot after every output event. Recorded pauses are capped so a
//! long idle period in the recording does not become dead air.

use serde::{Deserialize, Serialize};

use crate::config::ReplayConfig;
use crate::core::{Screen, Snapshot};

/// Kind of a recorded event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Terminal output (`"o"`)
    Output,
    /// Keyboard input (`"i"`)
    Input,
    /// Terminal resize (`"r"`)
    Resize,
    /// Marker (`"m"`)
    Marker,
    /// Anything else, kept verbatim
    Other(String),
}

impl EventKind {
    /// Map an asciicast event code
    pub fn from_code(code: &str) -> Self {
        match code {
            "o" => EventKind::Output,
            "i" => EventKind::Input,
            "r" => EventKind::Resize,
            "m" => EventKind::Marker,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Seconds since the start of the recording
    pub time: f64,
    pub kind: EventKind,
    pub data: String,
}

impl RecordedEvent {
    /// Output event at `time` seconds
    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self {
            time,
            kind: EventKind::Output,
            data: data.into(),
        }
    }
}

/// Drives a screen from recorded events on a logical clock
#[derive(Debug)]
pub struct Replayer {
    screen: Screen,
    config: ReplayConfig,
    /// Timestamp of the previous output event, in seconds
    prev_time: f64,
    /// Running logical clock, in milliseconds
    clock_ms: f64,
}

impl Replayer {
    pub fn new(screen: Screen, config: ReplayConfig) -> Self {
        Self {
            screen,
            config,
            prev_time: 0.0,
            clock_ms: 0.0,
        }
    }

    /// Current logical clock, in milliseconds
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn into_screen(self) -> Screen {
        self.screen
    }

    /// Process one event. Returns a snapshot for output events and `None`
    /// for every other kind.
    pub fn push(&mut self, event: &RecordedEvent) -> Option<Snapshot> {
        if event.kind != EventKind::Output {
            tracing::trace!(kind = ?event.kind, "skipping non-output event");
            return None;
        }

        self.clock_ms += self.delay_ms(event.time);
        self.prev_time = event.time;

        self.screen.feed(&event.data);
        Some(self.screen.snapshot(self.clock_ms))
    }

    /// Process every event, collecting the snapshots
    pub fn run<'a, I>(&mut self, events: I) -> Vec<Snapshot>
    where
        I: IntoIterator<Item = &'a RecordedEvent>,
    {
        events.into_iter().filter_map(|e| self.push(e)).collect()
    }

    /// Logical delay before an event recorded at `time`
    fn delay_ms(&self, time: f64) -> f64 {
        let speed = if self.config.speed > 0.0 {
            self.config.speed
        } else {
            1.0
        };
        let delta_ms = (time - self.prev_time) * 1000.0 / speed;
        delta_ms.clamp(0.0, self.config.max_idle_ms.max(0.0))
    }
}
