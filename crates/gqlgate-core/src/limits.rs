//! Limit evaluation.
//!
//! Compares computed metrics against configured limits in a fixed priority
//! order: depth, then batch size, then node count. The first enforced
//! dimension whose metric strictly exceeds its limit decides the rejection
//! and later dimensions are not consulted. A metric exactly equal to its
//! limit passes.

use std::fmt;

use crate::types::{QueryLimits, QueryMetrics};

/// A limit the query exceeded, carrying the computed metric and the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitViolation {
    Depth { depth: usize, limit: usize },
    Batch { operations: usize, limit: usize },
    Nodes { nodes: usize, limit: usize },
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depth { depth, limit } => {
                write!(f, "query has depth of {depth}, which exceeds max depth of {limit}")
            }
            Self::Batch { operations, limit } => {
                write!(
                    f,
                    "query contains {operations} operations, which exceeds the batch limit of {limit}"
                )
            }
            Self::Nodes { nodes, limit } => {
                write!(
                    f,
                    "query contains {nodes} nodes, which exceeds the node limit of {limit}"
                )
            }
        }
    }
}

/// Evaluate metrics against limits. A limit of 0 leaves that dimension
/// unenforced, regardless of the computed metric.
pub fn evaluate(metrics: &QueryMetrics, limits: &QueryLimits) -> Result<(), LimitViolation> {
    if limits.max_depth > 0 && metrics.max_depth > limits.max_depth {
        return Err(LimitViolation::Depth {
            depth: metrics.max_depth,
            limit: limits.max_depth,
        });
    }
    if limits.max_batch > 0 && metrics.batch_count > limits.max_batch {
        return Err(LimitViolation::Batch {
            operations: metrics.batch_count,
            limit: limits.max_batch,
        });
    }
    if limits.max_nodes > 0 && metrics.node_count > limits.max_nodes {
        return Err(LimitViolation::Nodes {
            nodes: metrics.node_count,
            limit: limits.max_nodes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> QueryMetrics {
        QueryMetrics {
            max_depth: 5,
            batch_count: 3,
            node_count: 12,
        }
    }

    #[test]
    fn no_enforced_dimension_accepts_anything() {
        assert_eq!(evaluate(&sample_metrics(), &QueryLimits::default()), Ok(()));
    }

    #[test]
    fn metric_equal_to_limit_is_accepted() {
        let limits = QueryLimits {
            max_depth: 5,
            max_batch: 3,
            max_nodes: 12,
        };
        assert_eq!(evaluate(&sample_metrics(), &limits), Ok(()));
    }

    #[test]
    fn each_dimension_rejects_when_strictly_exceeded() {
        let metrics = sample_metrics();

        let limits = QueryLimits {
            max_depth: 4,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&metrics, &limits),
            Err(LimitViolation::Depth { depth: 5, limit: 4 })
        );

        let limits = QueryLimits {
            max_batch: 2,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&metrics, &limits),
            Err(LimitViolation::Batch {
                operations: 3,
                limit: 2
            })
        );

        let limits = QueryLimits {
            max_nodes: 11,
            ..Default::default()
        };
        assert_eq!(
            evaluate(&metrics, &limits),
            Err(LimitViolation::Nodes {
                nodes: 12,
                limit: 11
            })
        );
    }

    #[test]
    fn depth_is_reported_before_batch_and_nodes() {
        // All three dimensions violated at once: depth wins and the rest are
        // never consulted.
        let limits = QueryLimits {
            max_depth: 1,
            max_batch: 1,
            max_nodes: 1,
        };
        assert_eq!(
            evaluate(&sample_metrics(), &limits),
            Err(LimitViolation::Depth { depth: 5, limit: 1 })
        );
    }

    #[test]
    fn batch_is_reported_before_nodes() {
        let limits = QueryLimits {
            max_depth: 0,
            max_batch: 1,
            max_nodes: 1,
        };
        assert_eq!(
            evaluate(&sample_metrics(), &limits),
            Err(LimitViolation::Batch {
                operations: 3,
                limit: 1
            })
        );
    }

    #[test]
    fn disabled_dimension_never_causes_rejection() {
        // Depth wildly over any sane ceiling, but unenforced.
        let metrics = QueryMetrics {
            max_depth: 10_000,
            batch_count: 1,
            node_count: 1,
        };
        let limits = QueryLimits {
            max_depth: 0,
            max_batch: 5,
            max_nodes: 5,
        };
        assert_eq!(evaluate(&metrics, &limits), Ok(()));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let metrics = sample_metrics();
        let limits = QueryLimits {
            max_depth: 2,
            max_batch: 2,
            max_nodes: 2,
        };
        assert_eq!(evaluate(&metrics, &limits), evaluate(&metrics, &limits));
    }

    #[test]
    fn violation_messages_carry_metric_and_limit() {
        assert_eq!(
            LimitViolation::Depth { depth: 2, limit: 1 }.to_string(),
            "query has depth of 2, which exceeds max depth of 1"
        );
        assert_eq!(
            LimitViolation::Batch {
                operations: 2,
                limit: 1
            }
            .to_string(),
            "query contains 2 operations, which exceeds the batch limit of 1"
        );
        assert_eq!(
            LimitViolation::Nodes { nodes: 7, limit: 6 }.to_string(),
            "query contains 7 nodes, which exceeds the node limit of 6"
        );
    }
}
