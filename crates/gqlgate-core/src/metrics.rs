//! Query metrics traversal.
//!
//! Computes nesting depth, batch size, and node count for a parsed document
//! in one depth-first, pre-order pass over its selection sets. The
//! accumulator is threaded through the recursion explicitly, so the
//! traversal holds no shared state and every call is independent.

use std::collections::HashMap;

use graphql_parser::query::{
    Definition, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
};

use crate::parse::ParsedDocument;
use crate::types::QueryMetrics;

/// Compute [`QueryMetrics`] for a document.
///
/// Every selection set is visited exactly once per occurrence. An
/// operation's body has depth 0 and counts as one batch element; every
/// deeper set counts as one node. Fragment spreads are expanded at the point
/// of reference, one level below the enclosing set, exactly like inline
/// fragments; fragment definitions contribute nothing at their definition
/// site.
pub fn collect_metrics(document: &ParsedDocument<'_>) -> QueryMetrics {
    let fragments: HashMap<&str, &FragmentDefinition<'_, String>> = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        })
        .collect();

    let mut metrics = QueryMetrics::default();
    let mut expanding = Vec::new();
    for definition in &document.definitions {
        if let Definition::Operation(operation) = definition {
            visit_selection_set(
                operation_body(operation),
                0,
                &fragments,
                &mut expanding,
                &mut metrics,
            );
        }
    }
    metrics
}

/// The selection set forming an operation's body.
fn operation_body<'a, 'd>(
    operation: &'d OperationDefinition<'a, String>,
) -> &'d SelectionSet<'a, String> {
    match operation {
        OperationDefinition::SelectionSet(set) => set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

fn visit_selection_set<'a, 'd>(
    set: &'d SelectionSet<'a, String>,
    depth: usize,
    fragments: &HashMap<&'d str, &'d FragmentDefinition<'a, String>>,
    expanding: &mut Vec<&'d str>,
    metrics: &mut QueryMetrics,
) {
    // Depth 0 is the body of a top-level operation and starts a new batch
    // element; anything deeper is a node.
    if depth == 0 {
        metrics.batch_count += 1;
    } else {
        metrics.node_count += 1;
    }
    if depth > metrics.max_depth {
        metrics.max_depth = depth;
    }

    for selection in &set.items {
        match selection {
            Selection::Field(field) => {
                // Leaf fields carry an empty selection set in this AST; only
                // a real sub-selection is a node.
                if !field.selection_set.items.is_empty() {
                    visit_selection_set(
                        &field.selection_set,
                        depth + 1,
                        fragments,
                        expanding,
                        metrics,
                    );
                }
            }
            Selection::InlineFragment(inline) => {
                visit_selection_set(&inline.selection_set, depth + 1, fragments, expanding, metrics);
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name.as_str();
                if expanding.iter().any(|active| *active == name) {
                    tracing::debug!(fragment = name, "cyclic fragment spread; expansion stopped");
                    continue;
                }
                match fragments.get(name) {
                    Some(fragment) => {
                        expanding.push(name);
                        visit_selection_set(
                            &fragment.selection_set,
                            depth + 1,
                            fragments,
                            expanding,
                            metrics,
                        );
                        expanding.pop();
                    }
                    None => {
                        tracing::debug!(
                            fragment = name,
                            "spread references an undefined fragment; skipped"
                        );
                    }
                }
            }
        }
    }
}

// ==============================================================================
// Tests
// ==============================================================================
