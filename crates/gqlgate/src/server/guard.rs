//! The request guard.
//!
//! Activates on POST requests to the configured GraphQL path when at least
//! one limit is enforced; everything else passes through unexamined. Guarded
//! requests are buffered, analyzed by `gqlgate-core`, and either forwarded
//! with their original body or rejected with a 400.

use std::borrow::Cow;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use gqlgate_core::{collect_metrics, evaluate, parse_document, QueryLimits};

use super::error::Rejection;
use super::SharedState;

pub(crate) async fn graphql_guard(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, Rejection> {
    if !is_guarded(&request, &state.graphql_path, &state.limits) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, state.max_body_bytes).await.map_err(|e| {
        tracing::debug!(error = %e, "failed to buffer request body");
        Rejection::BodyUnreadable
    })?;

    inspect(&bytes, &state.limits)?;

    // Accepted: forward the original bytes, not the analyzed view of them.
    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

/// Analysis runs only for POSTs to the exact configured path, and only when
/// there is a limit to enforce. Everything else is opaque traffic.
fn is_guarded(request: &Request, graphql_path: &str, limits: &QueryLimits) -> bool {
    request.method() == Method::POST
        && request.uri().path() == graphql_path
        && limits.enforces_any()
}

/// Run parse → metrics → evaluation over the buffered body.
fn inspect(bytes: &[u8], limits: &QueryLimits) -> Result<(), Rejection> {
    let source = extract_query(bytes)?;
    let document = parse_document(&source).map_err(|e| {
        tracing::debug!(error = %e, "request body is not a valid graphql document");
        Rejection::ParseFailure
    })?;

    let metrics = collect_metrics(&document);
    tracing::debug!(
        max_depth = metrics.max_depth,
        batch_count = metrics.batch_count,
        node_count = metrics.node_count,
        "query metrics computed"
    );

    evaluate(&metrics, limits).map_err(|violation| {
        tracing::info!(%violation, "rejecting query");
        Rejection::LimitExceeded(violation)
    })
}

/// The GraphQL source to analyze: the `query` member when the body is a JSON
/// envelope, otherwise the whole body as bare GraphQL text.
fn extract_query(bytes: &[u8]) -> Result<Cow<'_, str>, Rejection> {
    let text = std::str::from_utf8(bytes).map_err(|_| {
        tracing::debug!("request body is not valid utf-8");
        Rejection::ParseFailure
    })?;

    if let Ok(serde_json::Value::Object(envelope)) = serde_json::from_str(text) {
        if let Some(serde_json::Value::String(query)) = envelope.get("query") {
            return Ok(Cow::Owned(query.clone()));
        }
    }

    Ok(Cow::Borrowed(text))
}
