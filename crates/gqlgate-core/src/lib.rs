//! Core query analysis for Gqlgate.
//!
//! Parses a GraphQL request body, computes structural metrics (nesting
//! depth, batch size, node count) in a single traversal, and evaluates the
//! metrics against configured limits. Purely computational: it performs no
//! I/O and retains no state across calls, so every invocation is reentrant
//! under concurrent request handling.

pub mod error;
pub mod limits;
pub mod metrics;
pub mod parse;
pub mod types;

pub use error::CoreError;
pub use limits::{evaluate, LimitViolation};
pub use metrics::collect_metrics;
pub use parse::{parse_document, ParsedDocument};
pub use types::{QueryLimits, QueryMetrics};
