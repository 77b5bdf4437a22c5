use reqwest::StatusCode;
use thiserror::Error;

/// Base-URL resolution failures.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("error parsing URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("error parsing URL: no host specified")]
    MissingHost,

    #[error("error parsing URL: unsupported scheme {0}")]
    UnsupportedScheme(String),
}

/// Failures from the credential issuance endpoints. User-visible.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Login rejected by a reachable service, or no local directory match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration rejected by the remote service.
    #[error("registration failed: {status} - {body}")]
    RegistrationFailed { status: StatusCode, body: String },

    /// Transport-level failure on a path with no fallback.
    #[error("service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered but the body was not what the contract promises.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Catalog failures that are not absorbed by the stand-in fallback:
/// genuine application-level errors only. Connectivity and auth-shaped
/// failures never surface here.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {status} - {body}")]
    CatalogFetchFailed { status: StatusCode, body: String },

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}
