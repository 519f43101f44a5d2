use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use gqlgate_core::LimitViolation;

// ==============================================================================
// Rejection Type
// ==============================================================================

/// Why the guard (or the forwarder) short-circuited a request instead of
/// letting it reach the upstream.
#[derive(Debug)]
pub(crate) enum Rejection {
    /// The body could not be fully buffered (I/O failure or over the cap).
    BodyUnreadable,
    /// The body is not a syntactically valid GraphQL document.
    ParseFailure,
    /// A computed metric strictly exceeded its configured limit.
    LimitExceeded(LimitViolation),
    /// The upstream origin could not be reached or misbehaved.
    Upstream,
}

/// Wire shape every rejection renders as. Clients of the protected endpoint
/// expect a GraphQL-style error list.
#[derive(Serialize)]
struct ErrorBody {
    errors: Vec<ErrorDetail>,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: u16,
    message: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BodyUnreadable => {
                (StatusCode::BAD_REQUEST, "failed to read request body".to_owned())
            }
            Self::ParseFailure => {
                (StatusCode::BAD_REQUEST, "not a valid graphql query".to_owned())
            }
            Self::LimitExceeded(violation) => (StatusCode::BAD_REQUEST, violation.to_string()),
            Self::Upstream => (StatusCode::BAD_GATEWAY, "upstream request failed".to_owned()),
        };

        let body = ErrorBody {
            errors: vec![ErrorDetail {
                code: status.as_u16(),
                message,
            }],
        };

        (status, Json(body)).into_response()
    }
}
