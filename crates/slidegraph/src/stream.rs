//! Per-event driver: feeds events into a [`TimeWindowGraph`] and reads off
//! the average degree.
//!
//! For each event:
//!
//! 1. Drop it if `timestamp <= current_time - window_size` (too old).
//! 2. Advance the clock if the event is newer than anything seen so far.
//! 3. For every pair of labels, add the link or refresh its timestamp. An
//!    out-of-order event never moves a link back in time.
//! 4. Report the average degree.
//!
//! Labels only become nodes through a pair, so an event with a single label
//! still produces an output value but leaves the graph unchanged.

use crate::config::WindowConfig;
use crate::edge::Timestamp;
use crate::event::{label_pairs, Event};
use crate::graph::TimeWindowGraph;

/// Counters over the lifetime of a [`DegreeStream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Events that produced an output value.
    pub processed: usize,
    /// Events dropped for falling outside the window.
    pub skipped: usize,
    /// Links evicted by clock advances.
    pub evicted: usize,
}

/// Running average degree over a stream of [`Event`]s.
#[derive(Debug, Clone)]
pub struct DegreeStream {
    graph: TimeWindowGraph<String>,
    stats: StreamStats,
}

impl Default for DegreeStream {
    fn default() -> Self {
        Self::new(&WindowConfig::default())
    }
}

impl DegreeStream {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            graph: TimeWindowGraph::from_config(config),
            stats: StreamStats::default(),
        }
    }

    /// Apply one event. Returns the average degree afterwards, or `None` if
    /// the event was too old to count.
    pub fn process(&mut self, event: &Event) -> Option<f64> {
        self.ingest(event.timestamp, &event.labels)
    }

    /// Same as [`process`](Self::process) for callers that already hold the
    /// parts. `labels` must not contain duplicates.
    pub fn ingest(&mut self, timestamp: Timestamp, labels: &[String]) -> Option<f64> {
        let threshold = self.graph.threshold();
        if timestamp <= threshold {
            tracing::trace!(timestamp, threshold, "skipping out-of-window event");
            self.stats.skipped += 1;
            return None;
        }

        if timestamp > self.graph.current_time() {
            self.stats.evicted += self.graph.set_current_time(timestamp);
        }

        for (a, b) in label_pairs(labels) {
            self.touch(a, b, timestamp);
        }

        self.stats.processed += 1;
        Some(self.graph.average_degree())
    }

    /// Current average degree without applying anything.
    pub fn average_degree(&self) -> f64 {
        self.graph.average_degree()
    }

    pub fn graph(&self) -> &TimeWindowGraph<String> {
        &self.graph
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    fn touch(&mut self, a: &String, b: &String, timestamp: Timestamp) {
        if a == b {
            return;
        }
        if !self.graph.has_node(a) {
            self.graph.add_node(a.clone());
        }
        if !self.graph.has_node(b) {
            self.graph.add_node(b.clone());
        }

        match self.graph.check_link(a, b) {
            None => {
                self.graph.add_link(a, b, timestamp);
            }
            Some(seen) if seen < timestamp => {
                self.graph.update_link(a, b, timestamp);
            }
            Some(_) => {}
        }
    }
}

/// Render an average degree the way output lines expect it: two decimals.
pub fn format_degree(degree: f64) -> String {
    format!("{:.2}", degree)
}
