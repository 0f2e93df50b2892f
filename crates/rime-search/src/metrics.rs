//! Per-search counters.

/// Work done by a single search.
///
/// Populated by [`TemporalSearch`](crate::TemporalSearch) and attached to
/// every [`TimedPath`](crate::TimedPath) it returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchMetrics {
    /// BFS levels (ticks) explored.
    pub levels: u64,
    /// Nodes popped from a frontier and expanded.
    pub nodes_expanded: u64,
    /// Nodes discovered for the first time.
    pub nodes_enqueued: u64,
    /// Largest frontier seen.
    pub peak_frontier: usize,
    /// Provider period the search ran against.
    pub period: u64,
}
