use thiserror::Error;

/// Decode-time credential failures.
///
/// These never reach the user: the session evaluator treats every variant as
/// "no session".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The token is neither a valid signed form nor a valid three-segment
    /// local form, or required claim fields are missing after decoding.
    #[error("malformed credential")]
    Malformed,

    /// The role claim does not name a recognized role.
    #[error("unrecognized role: {0}")]
    UnknownRole(String),
}
