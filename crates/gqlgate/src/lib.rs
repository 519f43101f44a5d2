//! Gqlgate: a GraphQL query-limits enforcing reverse proxy.
//!
//! Sits in front of a GraphQL endpoint and rejects requests whose query
//! documents exceed configured depth, batch, or node limits before they
//! reach the upstream resolver. All other traffic passes through untouched.

pub mod cli;
pub mod server;
pub mod upstream;
