use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;

use gqlgate::cli::Cli;
use gqlgate::server::{build_router, AppState};
use gqlgate::upstream::HttpUpstream;
use gqlgate_core::QueryLimits;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let limits = QueryLimits {
        max_depth: args.depth_limit,
        max_batch: args.batch_limit,
        max_nodes: args.node_limit,
    };
    if !limits.enforces_any() {
        tracing::warn!(
            "no limits configured — graphql traffic will pass through unexamined"
        );
    }

    let upstream = HttpUpstream::new(&args.upstream).context("parse upstream origin")?;

    // Best-effort reachability check. The proxy still starts when the
    // upstream is down; it serves 502s until the origin comes back.
    if let Err(e) = upstream.probe().await {
        tracing::warn!(upstream = %args.upstream, error = %e, "upstream is not reachable yet");
    }

    let state = AppState {
        upstream: Arc::new(upstream),
        graphql_path: args.graphql_path.clone(),
        limits,
        max_body_bytes: args.max_body_bytes,
    };
    let router = build_router(state);

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 — it is accessible from the network");
    }

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!(
        addr = %bind_addr,
        upstream = %args.upstream,
        graphql_path = %args.graphql_path,
        depth_limit = limits.max_depth,
        batch_limit = limits.max_batch,
        node_limit = limits.max_nodes,
        "gqlgate is listening"
    );
    axum::serve(listener, router)
        .await
        .context("run HTTP server")?;

    Ok(())
}
