//! Asciicast v2 recordings
//!
//! Reads [asciicast v2](https://docs.asciinema.org/manual/asciicast/v2/)
//! files: a JSON header line followed by one `[time, code, data]` array per
//! event. Event lines that cannot be read are skipped so a damaged
//! recording still replays as far as possible.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ReplayConfig, ScreenConfig};
use crate::core::{Screen, Snapshot};
use crate::error::{Error, Result};
use crate::replay::{EventKind, RecordedEvent, Replayer};

const DEFAULT_WIDTH: usize = 120;
const DEFAULT_HEIGHT: usize = 40;

/// Asciicast header line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastHeader {
    pub version: u64,
    pub width: usize,
    pub height: usize,
    /// Recording start, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_time_limit: Option<f64>,
}

impl CastHeader {
    /// Read a header object.
    ///
    /// Only `version` is required. Every other field falls back to its
    /// default when missing or of an unexpected type.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(fields) = value.as_object() else {
            return Err(Error::InvalidHeader(format!(
                "expected a JSON object, found {}",
                value
            )));
        };

        let version = match fields.get("version") {
            Some(v) => v.as_u64().ok_or_else(|| {
                Error::InvalidHeader(format!("non-integer \"version\": {}", v))
            })?,
            None => {
                return Err(Error::InvalidHeader(
                    "missing numeric \"version\" field".to_string(),
                ))
            }
        };

        let dimension = |key: &str, default: usize| match fields.get(key) {
            None => default,
            Some(v) => match v.as_u64().and_then(|n| usize::try_from(n).ok()) {
                Some(n) => n,
                None => {
                    tracing::warn!("Ignoring unreadable asciicast {}: {}", key, v);
                    default
                }
            },
        };

        Ok(CastHeader {
            version,
            width: dimension("width", DEFAULT_WIDTH),
            height: dimension("height", DEFAULT_HEIGHT),
            timestamp: fields.get("timestamp").and_then(Value::as_f64),
            title: fields.get("title").and_then(Value::as_str).map(str::to_string),
            idle_time_limit: fields.get("idle_time_limit").and_then(Value::as_f64),
        })
    }
}

/// A parsed recording
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub header: CastHeader,
    pub events: Vec<RecordedEvent>,
}

impl Cast {
    /// Parse the text of an asciicast v2 file
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let header_line = lines.next().ok_or(Error::EmptyRecording)?;

        let raw: Value = serde_json::from_str(header_line)?;
        let header = CastHeader::from_value(&raw)?;
        if header.version != 2 {
            return Err(Error::UnsupportedVersion(header.version));
        }

        let mut events = Vec::new();
        for (index, line) in lines.enumerate() {
            match parse_event(line) {
                Some(event) => events.push(event),
                None => tracing::warn!("Skipping unreadable asciicast event {}", index + 1),
            }
        }

        tracing::debug!(
            width = header.width,
            height = header.height,
            events = events.len(),
            "parsed asciicast"
        );

        Ok(Cast { header, events })
    }

    /// Read and parse an asciicast v2 file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Screen configuration matching the recorded terminal size
    pub fn screen_config(&self) -> ScreenConfig {
        ScreenConfig::new(self.header.height, self.header.width)
    }

    /// Output events only
    pub fn output_events(&self) -> impl Iterator<Item = &RecordedEvent> + '_ {
        self.events.iter().filter(|e| e.kind == EventKind::Output)
    }

    /// Replay the recording on a screen of the recorded size
    pub fn replay(&self, config: &ReplayConfig) -> Result<Vec<Snapshot>> {
        self.replay_with(&self.screen_config(), config)
    }

    /// Replay the recording on a screen built from `screen`
    pub fn replay_with(&self, screen: &ScreenConfig, config: &ReplayConfig) -> Result<Vec<Snapshot>> {
        let screen = Screen::from_config(screen)?;
        let mut replayer = Replayer::new(screen, config.clone());
        Ok(replayer.run(&self.events))
    }
}

/// Parse one `[time, code, data]` line
fn parse_event(line: &str) -> Option<RecordedEvent> {
    let value: Value = serde_json::from_str(line).ok()?;
    let entry = value.as_array()?;
    if entry.len() < 3 {
        return None;
    }

    let time = match &entry[0] {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.parse().ok()?,
        _ => return None,
    };
    let code = match &entry[1] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let data = match &entry[2] {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(RecordedEvent {
        time,
        kind: EventKind::from_code(&code),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"{"version": 2, "width": 20, "height": 4, "timestamp": 1700000000}"#;

    #[test]
    fn test_parse_header_and_events() {
        let text = format!(
            "{}\n[0.5, \"o\", \"hello\"]\n[0.6, \"i\", \"x\"]\n[1.0, \"o\", \"\\r\\nworld\"]\n",
            HEADER
        );
        let cast = Cast::parse(&text).unwrap();

        assert_eq!(cast.header.width, 20);
        assert_eq!(cast.header.height, 4);
        assert_eq!(cast.header.timestamp, Some(1_700_000_000.0));
        assert_eq!(cast.events.len(), 3);
        assert_eq!(cast.events[1].kind, EventKind::Input);
        assert_eq!(cast.output_events().count(), 2);
        assert_eq!(cast.events[2].data, "\r\nworld");
    }

    #[test]
    fn test_header_defaults() {
        let cast = Cast::parse(r#"{"version": 2}"#).unwrap();
        assert_eq!(cast.screen_config(), ScreenConfig::new(40, 120));
        assert!(cast.events.is_empty());
    }

    #[test]
    fn test_empty_recording() {
        assert!(matches!(Cast::parse(""), Err(Error::EmptyRecording)));
        assert!(matches!(Cast::parse("\n  \n"), Err(Error::EmptyRecording)));
    }

    #[test]
    fn test_unsupported_version() {
        let err = Cast::parse(r#"{"version": 1, "width": 80, "height": 24}"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(1)));
    }

    #[test]
    fn test_invalid_header() {
        assert!(matches!(Cast::parse("not json"), Err(Error::Json(_))));
        assert!(matches!(
            Cast::parse(r#"{"width": 80}"#),
            Err(Error::InvalidHeader(_))
        ));
        assert!(matches!(
            Cast::parse(r#"{"version": "2"}"#),
            Err(Error::InvalidHeader(_))
        ));
        assert!(matches!(Cast::parse("[2, 80, 24]"), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_header_fields_read_leniently() {
        let cast = Cast::parse(
            r#"{"version": 2, "width": 100, "height": 30, "timestamp": 1700000000.5, "env": "sh", "theme": [1, 2], "title": 7}"#,
        )
        .unwrap();
        assert_eq!(cast.header.timestamp, Some(1_700_000_000.5));
        assert_eq!(cast.header.title, None);
        assert_eq!(cast.screen_config(), ScreenConfig::new(30, 100));

        let cast = Cast::parse(r#"{"version": 2, "width": "wide", "height": -1}"#).unwrap();
        assert_eq!(cast.screen_config(), ScreenConfig::new(40, 120));
    }

    #[test]
    fn test_malformed_events_skipped() {
        let text = format!(
            "{}\n[0.1, \"o\", \"a\"]\n{{broken\n[0.2, \"o\"]\n\"text\"\n[\"0.3\", \"o\", \"b\"]\n",
            HEADER
        );
        let cast = Cast::parse(&text).unwrap();
        let data: Vec<&str> = cast.events.iter().map(|e| e.data.as_str()).collect();
        assert_eq!(data, vec!["a", "b"]);
        assert_eq!(cast.events[1].time, 0.3);
    }

    #[test]
    fn test_replay_uses_recorded_size() {
        let text = format!(
            "{}\n[0.5, \"o\", \"\\u001b[32mok\\u001b[0m\"]\n[9.5, \"o\", \" done\"]\n",
            HEADER
        );
        let cast = Cast::parse(&text).unwrap();
        let snapshots = cast.replay(&ReplayConfig::default()).unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].t_ms, 500.0);
        assert_eq!(snapshots[1].t_ms, 2500.0);
        assert_eq!(snapshots[1].lines[0], "ok done");
        assert_eq!(snapshots[1].rows(), 4);
        assert_eq!(snapshots[1].cols(), 20);
    }

    #[test]
    fn test_replay_zero_size_recording_fails() {
        let cast = Cast::parse(r#"{"version": 2, "width": 0, "height": 24}"#).unwrap();
        assert!(matches!(
            cast.replay(&ReplayConfig::default()),
            Err(Error::InvalidDimensions { rows: 24, cols: 0 })
        ));
    }
}
