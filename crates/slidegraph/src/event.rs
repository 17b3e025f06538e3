//! Event extraction from line-delimited JSON.
//!
//! Each input line is one JSON object. Two shapes are understood:
//!
//! ```text
//! {"timestamp": 1459, "labels": ["spark", "hadoop"]}
//! {"created_at": "Thu Mar 24 17:51:10 +0000 2016",
//!  "entities": {"hashtags": [{"text": "Spark"}, {"text": "Apache"}]}}
//! ```
//!
//! Missing or unusable fields never fail a line. A `timestamp` that is not
//! an integer falls back to `created_at`, then to `0`. Labels that are not
//! strings are dropped. Only text that is not a JSON object at all is an
//! error.

use crate::edge::Timestamp;
use crate::error::{Error, Result};
use chrono::DateTime;
use serde_json::Value;
use std::collections::HashSet;
use std::io::BufRead;

/// `created_at` layout, e.g. `Thu Mar 24 17:51:10 +0000 2016`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One timestamped set of distinct labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Timestamp,
    pub labels: Vec<String>,
}

impl Event {
    /// Build an event, dropping empty and repeated labels (first occurrence
    /// wins).
    pub fn new<I, S>(timestamp: Timestamp, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let labels = labels
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.is_empty() && seen.insert(l.clone()))
            .collect();
        Self { timestamp, labels }
    }

    /// Every unordered pair of distinct labels.
    pub fn pairs(&self) -> impl Iterator<Item = (&String, &String)> {
        label_pairs(&self.labels)
    }
}

/// Every unordered pair `(labels[i], labels[j])` with `i < j`.
pub(crate) fn label_pairs(labels: &[String]) -> impl Iterator<Item = (&String, &String)> {
    labels
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| labels[i + 1..].iter().map(move |b| (a, b)))
}

/// Turns JSON lines into [`Event`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventParser {
    lowercase: bool,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold labels to lower case.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Parse one line. Blank lines yield `Ok(None)`.
    ///
    /// `line_no` is 1-based and only used for error messages.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<Event>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let raw: Value = serde_json::from_str(line).map_err(|e| Error::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        if !raw.is_object() {
            return Err(Error::Parse {
                line: line_no,
                message: "expected a JSON object".to_string(),
            });
        }

        let created_at = raw.get("created_at").and_then(Value::as_str);
        let timestamp = match (raw.get("timestamp").and_then(numeric_timestamp), created_at) {
            (Some(ts), _) => ts.max(0),
            (None, Some(text)) => parse_created_at(text).unwrap_or_else(|| {
                tracing::debug!(line = line_no, created_at = text, "unparseable timestamp");
                0
            }),
            (None, None) => 0,
        };

        let labels: Vec<&str> = match raw.get("labels").and_then(Value::as_array) {
            Some(labels) => labels.iter().filter_map(Value::as_str).collect(),
            None => raw
                .pointer("/entities/hashtags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(|tag| tag.get("text").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default(),
        };

        let labels = labels.into_iter().map(|l| {
            if self.lowercase {
                l.to_lowercase()
            } else {
                l.to_string()
            }
        });
        Ok(Some(Event::new(timestamp, labels)))
    }

    /// Parse every line of `reader`, skipping blank lines.
    pub fn events<R: BufRead>(self, reader: R) -> impl Iterator<Item = Result<Event>> {
        reader
            .lines()
            .enumerate()
            .filter_map(move |(i, line)| match line {
                Ok(line) => self.parse_line(i + 1, &line).transpose(),
                Err(e) => Some(Err(Error::Io(e))),
            })
    }
}

/// Integer `timestamp` value. Whole-valued floats count too; anything else
/// is treated as absent.
fn numeric_timestamp(value: &Value) -> Option<Timestamp> {
    if let Some(ts) = value.as_i64() {
        return Some(ts);
    }
    let ts = value.as_f64()?;
    let in_range = ts.fract() == 0.0 && ts >= i64::MIN as f64 && ts < i64::MAX as f64;
    in_range.then_some(ts as Timestamp)
}

/// Seconds since epoch for a `created_at` string; RFC 3339 is accepted too.
pub fn parse_created_at(text: &str) -> Option<Timestamp> {
    DateTime::parse_from_str(text, CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
        .map(|dt| dt.timestamp().max(0))
}
