use clap::Parser;

/// Gqlgate — GraphQL query-limits enforcing reverse proxy.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address to bind the proxy to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Upstream origin to forward requests to (scheme://host[:port]).
    #[arg(long, env = "GQLGATE_UPSTREAM")]
    pub upstream: String,

    /// Path of the GraphQL endpoint to inspect. Requests to other paths
    /// pass through unexamined.
    #[arg(long, default_value = "/graphql", env = "GQLGATE_GRAPHQL_PATH")]
    pub graphql_path: String,

    /// Maximum selection nesting depth. 0 disables the check.
    #[arg(long, default_value = "0", env = "GQLGATE_DEPTH_LIMIT")]
    pub depth_limit: usize,

    /// Maximum operations per request document. 0 disables the check.
    #[arg(long, default_value = "0", env = "GQLGATE_BATCH_LIMIT")]
    pub batch_limit: usize,

    /// Maximum nested selection nodes per request document. 0 disables the
    /// check.
    #[arg(long, default_value = "0", env = "GQLGATE_NODE_LIMIT")]
    pub node_limit: usize,

    /// Maximum inspected request body size in bytes.
    #[arg(long, default_value = "2097152")]
    pub max_body_bytes: usize,
}
