//! Undirected graph whose edges expire after a trailing time window.
//!
//! Each link remembers the last time it was seen. Links are also kept in an
//! [`IndexedMinPQ`] keyed by their canonical [`EdgeKey`], so advancing the
//! clock only touches links that actually fall out of the window:
//!
//! ```text
//! window = 60, current_time = 85  =>  threshold = 25
//!
//!   a-b @20  a-c @20  b-c @20  |  d-e @85
//!   <------- evicted ------->  |  kept (t > threshold)
//! ```
//!
//! Nodes left without links by eviction are pruned (unless pruning is turned
//! off), so [`TimeWindowGraph::average_degree`] reflects only labels that are
//! currently connected.

use crate::config::WindowConfig;
use crate::edge::{EdgeKey, Timestamp};
use crate::minpq::IndexedMinPQ;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Co-occurrence graph over a sliding time window.
///
/// Simple and undirected: no self-loops, at most one link per node pair.
/// Node identifiers need a total order for edge canonicalisation.
#[derive(Debug, Clone)]
pub struct TimeWindowGraph<N> {
    window_size: Timestamp,
    prune_isolated: bool,
    num_links: usize,
    num_nodes: usize,
    current_time: Timestamp,
    /// node -> neighbours
    adjacency: HashMap<N, HashSet<N>>,
    /// canonical pair -> last-seen time
    links: IndexedMinPQ<EdgeKey<N>, Timestamp>,
}

impl<N> Default for TimeWindowGraph<N>
where
    N: Ord + Hash + Clone,
{
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

impl<N> TimeWindowGraph<N>
where
    N: Ord + Hash + Clone,
{
    /// Create an empty graph with the given window size.
    pub fn new(window_size: Timestamp) -> Self {
        Self {
            window_size,
            prune_isolated: true,
            num_links: 0,
            num_nodes: 0,
            current_time: 0,
            adjacency: HashMap::new(),
            links: IndexedMinPQ::new(),
        }
    }

    /// Create an empty graph from a [`WindowConfig`].
    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(config.window_size).with_pruning(config.prune_isolated)
    }

    /// Whether eviction removes nodes it leaves isolated (default `true`).
    pub fn with_pruning(mut self, prune_isolated: bool) -> Self {
        self.prune_isolated = prune_isolated;
        self
    }

    pub fn has_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Add a node with no links. Returns `false` if it already exists.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, HashSet::new());
        self.num_nodes += 1;
        true
    }

    /// Remove a node and every link touching it.
    ///
    /// Returns `false` if the node does not exist.
    pub fn remove_node(&mut self, node: &N) -> bool {
        // Snapshot first: remove_link mutates the set we would be iterating.
        let neighbors: Vec<N> = match self.adjacency.get(node) {
            Some(set) => set.iter().cloned().collect(),
            None => return false,
        };
        for other in &neighbors {
            self.remove_link(node, other);
        }
        self.adjacency.remove(node);
        self.num_nodes -= 1;
        true
    }

    /// Last-seen time of the link `a`–`b`, or `None` if there is no such
    /// link (including when either node is missing or `a == b`).
    pub fn check_link(&self, a: &N, b: &N) -> Option<Timestamp> {
        if !self.adjacency.get(a)?.contains(b) {
            return None;
        }
        let key = EdgeKey::new(a.clone(), b.clone())?;
        self.links.value(&key).copied()
    }

    /// Add a link between two existing, distinct, not-yet-linked nodes.
    ///
    /// If `time` is ahead of the current time the clock advances, after the
    /// link is stored, so the new link goes through the same eviction pass
    /// as everything else.
    pub fn add_link(&mut self, a: &N, b: &N, time: Timestamp) -> bool {
        if !self.has_node(a) || !self.has_node(b) {
            return false;
        }
        let Some(key) = EdgeKey::new(a.clone(), b.clone()) else {
            return false;
        };
        if !self.links.add(key, time) {
            return false;
        }

        self.attach(a, b);
        self.num_links += 1;

        if time > self.current_time {
            self.set_current_time(time);
        }
        true
    }

    /// Overwrite the last-seen time of an existing link.
    ///
    /// An older `time` is stored as given; the clock itself never moves
    /// backwards.
    pub fn update_link(&mut self, a: &N, b: &N, time: Timestamp) -> bool {
        if self.check_link(a, b).is_none() {
            return false;
        }
        let Some(key) = EdgeKey::new(a.clone(), b.clone()) else {
            return false;
        };
        if !self.links.update(&key, time) {
            return false;
        }

        if time > self.current_time {
            self.set_current_time(time);
        }
        true
    }

    /// Remove the link `a`–`b`. Returns `false` if it does not exist.
    pub fn remove_link(&mut self, a: &N, b: &N) -> bool {
        if self.check_link(a, b).is_none() {
            return false;
        }
        let Some(key) = EdgeKey::new(a.clone(), b.clone()) else {
            return false;
        };
        if !self.links.remove(&key) {
            return false;
        }

        self.detach(a, b);
        self.num_links -= 1;
        true
    }

    /// Remove and return the oldest link.
    ///
    /// Among links sharing the oldest timestamp, which one comes out first is
    /// unspecified.
    pub fn remove_min_link(&mut self) -> Option<(EdgeKey<N>, Timestamp)> {
        let (key, time) = self.links.pop_min()?;
        self.detach(key.lo(), key.hi());
        self.num_links -= 1;
        Some((key, time))
    }

    /// Advance the clock to `time` and evict links that fall out of the
    /// window. Returns the number of evicted links.
    ///
    /// Negative times are ignored, as are times behind the current clock.
    pub fn set_current_time(&mut self, time: Timestamp) -> usize {
        if time < 0 || time < self.current_time {
            return 0;
        }
        self.current_time = time;
        if self.num_links > 0 {
            self.evict()
        } else {
            0
        }
    }

    /// `2 * links / nodes`, or `0.0` for an empty graph.
    pub fn average_degree(&self) -> f64 {
        if self.num_nodes == 0 {
            0.0
        } else {
            2.0 * self.num_links as f64 / self.num_nodes as f64
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_links(&self) -> usize {
        self.num_links
    }

    pub fn current_time(&self) -> Timestamp {
        self.current_time
    }

    pub fn window_size(&self) -> Timestamp {
        self.window_size
    }

    /// Links with a timestamp at or below this value are outside the window.
    pub fn threshold(&self) -> Timestamp {
        self.current_time.saturating_sub(self.window_size)
    }

    /// Number of links touching `node` (0 if absent).
    pub fn degree(&self, node: &N) -> usize {
        self.adjacency.get(node).map_or(0, HashSet::len)
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// All links with their last-seen time, in no particular order.
    pub fn links(&self) -> impl Iterator<Item = (&EdgeKey<N>, Timestamp)> {
        self.links.iter().map(|(k, &t)| (k, t))
    }

    /// Check the structural invariants: counters match the containers,
    /// adjacency is symmetric, and adjacency and queue describe the same
    /// link set.
    pub fn is_consistent(&self) -> bool {
        if self.num_nodes != self.adjacency.len() || self.num_links != self.links.len() {
            return false;
        }

        let mut half_edges = 0usize;
        for (node, neighbors) in &self.adjacency {
            for other in neighbors {
                let symmetric = self
                    .adjacency
                    .get(other)
                    .is_some_and(|back| back.contains(node));
                let queued = EdgeKey::new(node.clone(), other.clone())
                    .is_some_and(|key| self.links.contains_key(&key));
                if !symmetric || !queued {
                    return false;
                }
                half_edges += 1;
            }
        }
        half_edges == 2 * self.num_links
    }

    fn evict(&mut self) -> usize {
        let threshold = self.threshold();
        let mut evicted = 0;

        while let Some((_, &oldest)) = self.links.peek_min() {
            if oldest > threshold {
                break;
            }
            let Some((key, _)) = self.remove_min_link() else {
                break;
            };
            evicted += 1;

            if self.prune_isolated {
                let (lo, hi) = key.into_pair();
                for endpoint in [lo, hi] {
                    if self.degree(&endpoint) == 0 {
                        self.remove_node(&endpoint);
                    }
                }
            }
        }

        if evicted > 0 {
            tracing::debug!(
                evicted,
                threshold,
                nodes = self.num_nodes,
                links = self.num_links,
                "evicted stale links"
            );
        }
        evicted
    }

    fn attach(&mut self, a: &N, b: &N) {
        if let Some(set) = self.adjacency.get_mut(a) {
            set.insert(b.clone());
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.insert(a.clone());
        }
    }

    fn detach(&mut self, a: &N, b: &N) {
        if let Some(set) = self.adjacency.get_mut(a) {
            set.remove(b);
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.remove(a);
        }
    }
}

impl<N> fmt::Display for TimeWindowGraph<N>
where
    N: Ord + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<&N> = self.adjacency.keys().collect();
        nodes.sort();
        let mut links: Vec<(&EdgeKey<N>, Timestamp)> = self.links().collect();
        links.sort();

        writeln!(f, "Nodes (total: {}):", self.num_nodes)?;
        let names: Vec<String> = nodes.iter().map(|n| format!("{:?}", n)).collect();
        writeln!(f, "{}", names.join(", "))?;
        writeln!(f, "Links (total: {}):", self.num_links)?;
        for (key, time) in links {
            writeln!(f, "{} : {}", key, time)?;
        }
        write!(f, "average degree: {:.2}", self.average_degree())
    }
}
