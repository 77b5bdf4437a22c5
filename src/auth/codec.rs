//! Credential codec.
//!
//! Two wire encodings exist and every consumer must handle both:
//!
//! - *Signed form*: a JWT issued by the remote service. The client holds no
//!   verification key, so claims are extracted from the payload segment
//!   without signature verification; liveness and role checks happen on the
//!   decoded claims.
//! - *Local form*: `mock.<base64(JSON claims)>.signature`, synthesized by the
//!   issuance fallback when the service is unreachable. The first and third
//!   segments are fixed sentinels, not cryptographic material.
//!
//! The decoder dispatches on structure, never by trial-and-error parsing: a
//! local-form token would not decode as a signed token, so [`is_local_form`]
//! is checked first.

use crate::auth::claims::Claims;
use crate::auth::error::CredentialError;
use base64ct::{Base64, Base64UrlUnpadded, Encoding};

/// First segment of a locally synthesized credential.
pub const LOCAL_PREFIX: &str = "mock";
/// Third segment of a locally synthesized credential.
pub const LOCAL_SIGNATURE: &str = "signature";

/// A credential tagged by its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Token issued and signed by the remote service.
    Signed(String),
    /// Token synthesized locally while the service was unreachable.
    Local(String),
}

impl Credential {
    /// Classify a raw token by structure. Pure; no decoding happens here.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if is_local_form(token) {
            Self::Local(token.to_string())
        } else {
            Self::Signed(token.to_string())
        }
    }

    /// The raw token, as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Signed(token) | Self::Local(token) => token,
        }
    }

    /// Decode the claims for this credential's encoding.
    ///
    /// # Errors
    /// Returns [`CredentialError::Malformed`] if the token does not have three
    /// segments, the payload segment is not valid base64/JSON, or a required
    /// claim field is missing.
    pub fn claims(&self) -> Result<Claims, CredentialError> {
        let bytes = match self {
            // btoa-style: standard alphabet, padded.
            Self::Local(token) => Base64::decode_vec(payload_segment(token)?),
            // JWT payload: URL-safe alphabet, unpadded.
            Self::Signed(token) => Base64UrlUnpadded::decode_vec(payload_segment(token)?),
        }
        .map_err(|_| CredentialError::Malformed)?;

        serde_json::from_slice(&bytes).map_err(|_| CredentialError::Malformed)
    }
}

/// Structural predicate for the local fallback encoding: exactly three
/// dot-separated segments, the first being the fixed sentinel.
#[must_use]
pub fn is_local_form(token: &str) -> bool {
    let mut segments = token.split('.');
    segments.next() == Some(LOCAL_PREFIX)
        && segments.next().is_some()
        && segments.next().is_some()
        && segments.next().is_none()
}

/// Decode a raw token of either encoding.
///
/// # Errors
/// See [`Credential::claims`].
pub fn decode(token: &str) -> Result<Claims, CredentialError> {
    Credential::parse(token).claims()
}

/// Synthesize a local-form token embedding `claims`.
#[must_use]
pub fn encode_local(claims: &Claims) -> String {
    let payload = serde_json::to_vec(claims).unwrap_or_default();
    format!(
        "{LOCAL_PREFIX}.{}.{LOCAL_SIGNATURE}",
        Base64::encode_string(&payload)
    )
}

fn payload_segment(token: &str) -> Result<&str, CredentialError> {
    let segments: Vec<&str> = token.split('.').collect();
    match segments.as_slice() {
        [_, payload, _] => Ok(payload),
        _ => Err(CredentialError::Malformed),
    }
}
