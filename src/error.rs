//! Error taxonomy for the node.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Failures surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("amount must be a nonnegative whole number, got {0}")]
    InvalidAmount(String),

    #[error("invalid node address: {0}")]
    InvalidAddress(#[from] RegistryError),

    #[error("please supply a valid list of nodes")]
    EmptyNodeList,

    #[error("chain advanced while mining, proof is stale")]
    StaleProof,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            NodeError::MissingField(_)
            | NodeError::InvalidAmount(_)
            | NodeError::InvalidAddress(_)
            | NodeError::EmptyNodeList => StatusCode::BAD_REQUEST,
            NodeError::StaleProof => StatusCode::CONFLICT,
            NodeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Why a peer contributed nothing to a resolution round.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("peer answered with status {0}")]
    Status(u16),

    #[error("malformed peer response: {0}")]
    Malformed(String),

    #[error("peer timed out")]
    Timeout,
}

/// A peer address that cannot be normalized to `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("cannot parse `{0}`")]
    Unparseable(String),

    #[error("no host in `{0}`")]
    MissingHost(String),

    #[error("`{0}` is not an http address")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            NodeError::MissingField("amount").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(NodeError::StaleProof.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            NodeError::InvalidAmount("2.5".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NodeError::from(RegistryError::MissingHost("http://".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            NodeError::MissingField("recipient").to_string(),
            "missing required field: recipient"
        );
        assert_eq!(PeerError::Status(500).to_string(), "peer answered with status 500");
    }
}
