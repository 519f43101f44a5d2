//! HTTP boundary: router assembly and upstream forwarding.

mod error;
mod guard;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware;
use axum::response::Response;
use axum::Router;
use tower_http::trace::TraceLayer;

use gqlgate_core::QueryLimits;

use crate::upstream::Upstream;
use error::Rejection;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    /// Exact request path on which query analysis activates.
    pub graphql_path: String,
    pub limits: QueryLimits,
    /// Cap on bodies buffered for inspection. Unexamined traffic streams
    /// through without buffering.
    pub max_body_bytes: usize,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

/// Assemble the proxy router: every request falls through to the upstream
/// forwarder, with the GraphQL guard layered in front of it.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .fallback(forward)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&shared),
            guard::graphql_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

// ==============================================================================
// Forwarding
// ==============================================================================

async fn forward(
    State(state): State<SharedState>,
    request: Request,
) -> Result<Response, Rejection> {
    state.upstream.forward(request).await.map_err(|e| {
        tracing::warn!(error = %e, "failed to forward request upstream");
        Rejection::Upstream
    })
}
