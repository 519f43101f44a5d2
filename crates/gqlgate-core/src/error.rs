use graphql_parser::query::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("not a valid graphql query: {0}")]
    InvalidQuery(#[from] ParseError),
}
