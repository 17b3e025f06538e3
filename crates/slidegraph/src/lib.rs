#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

//! Average degree of a label co-occurrence graph over a sliding time window.
//!
//! Events carry a timestamp and a set of labels. Labels are nodes; two labels
//! seen in the same event are linked. Links expire once they are older than
//! the window, and nodes that lose their last link go with them.
//!
//! - [`IndexedMinPQ`] - binary min-heap with O(log n) removal and update by key
//! - [`TimeWindowGraph`] - undirected graph with expiring links
//! - [`DegreeStream`] - per-event driver producing the running average degree
//! - [`EventParser`] - JSON-lines event extraction
//!
//! # Example
//!
//! ```rust
//! use slidegraph::{format_degree, DegreeStream, Event, WindowConfig};
//!
//! let mut stream = DegreeStream::new(&WindowConfig::with_window(60));
//!
//! let out: Vec<String> = [
//!     Event::new(10, ["a", "b"]),
//!     Event::new(20, ["a", "b", "c"]),
//!     Event::new(85, ["d", "e"]),
//! ]
//! .iter()
//! .filter_map(|e| stream.process(e))
//! .map(format_degree)
//! .collect();
//!
//! assert_eq!(out, ["1.00", "2.00", "1.00"]);
//! ```
//!
//! # Threading
//!
//! Everything here is a plain owned value with `&mut self` mutation. To share
//! a stream across threads, put it behind one lock and hold that lock for a
//! whole event: check-then-add sequences are not atomic on their own.

pub mod config;
pub mod edge;
mod error;
pub mod event;
pub mod graph;
pub mod minpq;
pub mod stream;

pub use config::{WindowConfig, DEFAULT_WINDOW_SIZE};
pub use edge::{EdgeKey, Timestamp};
pub use error::{Error, Result};
pub use event::{Event, EventParser};
pub use graph::TimeWindowGraph;
pub use minpq::IndexedMinPQ;
pub use stream::{format_degree, DegreeStream, StreamStats};
