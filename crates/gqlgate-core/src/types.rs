//! Value objects for query analysis: per-request metrics and configured limits.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Query Metrics
// ==============================================================================

/// Structural metrics of one parsed GraphQL document.
///
/// Computed fresh for every request by [`crate::metrics::collect_metrics`]
/// and never mutated after the traversal completes. All three counters are
/// non-negative and only ever grow while selection sets are being visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMetrics {
    /// Deepest selection-set nesting seen across all operations. An
    /// operation's own body is depth 0.
    pub max_depth: usize,
    /// Number of top-level operation definitions in the document.
    pub batch_count: usize,
    /// Number of nested (non-top-level) selection sets.
    pub node_count: usize,
}

// ==============================================================================
// Query Limits
// ==============================================================================

/// Configured ceilings for query metrics.
///
/// A limit of 0 disables enforcement for that dimension entirely. Read-only
/// for the lifetime of the proxy; safe for unsynchronized concurrent reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLimits {
    /// Maximum selection nesting depth.
    pub max_depth: usize,
    /// Maximum operations per request document.
    pub max_batch: usize,
    /// Maximum nested selection nodes per request document.
    pub max_nodes: usize,
}

impl QueryLimits {
    /// Whether any dimension is enforced at all. When nothing is enforced,
    /// the boundary skips parsing altogether.
    pub fn enforces_any(&self) -> bool {
        self.max_depth > 0 || self.max_batch > 0 || self.max_nodes > 0
    }
}
