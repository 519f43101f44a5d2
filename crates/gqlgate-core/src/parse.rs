//! Adapter over the `graphql-parser` grammar library.
//!
//! Purely a text-to-tree transformation: syntax failures surface as
//! [`CoreError::InvalidQuery`] and carry no partial document.

use graphql_parser::query::Document;

use crate::error::CoreError;

/// A parsed GraphQL request document with owned string values.
pub type ParsedDocument<'a> = Document<'a, String>;

/// Parse a raw UTF-8 body into a document.
///
/// Parsing is permissive: no schema validation is performed and documents
/// containing several anonymous operations are accepted, since the metrics
/// traversal needs to see every operation to count batch elements.
pub fn parse_document(source: &str) -> Result<ParsedDocument<'_>, CoreError> {
    Ok(graphql_parser::parse_query::<String>(source)?)
}
