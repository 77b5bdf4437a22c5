use crate::auth::role::Role;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims carried by every credential, regardless of wire encoding.
///
/// Unknown extra fields in a token payload are ignored; all four fields here
/// are required for a decode to succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id.
    pub sub: String,
    /// Role asserted for the subject.
    pub role: Role,
    /// Issued-at, Unix epoch seconds.
    pub iat: i64,
    /// Expiry, Unix epoch seconds.
    pub exp: i64,
}

impl Claims {
    /// Claims issued now, valid for `ttl_secs`.
    #[must_use]
    pub fn issue(sub: String, role: Role, ttl_secs: i64) -> Self {
        let now = now_epoch();
        Self {
            sub,
            role,
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Strict comparison: `exp == now` counts as expired. Clock skew is not
    /// compensated.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp <= now_epoch()
    }
}

/// Current time as Unix epoch seconds.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_sets_window_relative_to_now() {
        let claims = Claims::issue("3".to_string(), Role::Attendee, 60);
        assert_eq!(claims.exp - claims.iat, 60);
        assert!(!claims.is_expired());
    }

    #[test]
    fn expiry_is_strict() {
        let now = now_epoch();
        let at_boundary = Claims {
            sub: "1".to_string(),
            role: Role::Admin,
            iat: now - 60,
            exp: now,
        };
        assert!(at_boundary.is_expired());

        let still_live = Claims {
            exp: now + 2,
            ..at_boundary
        };
        assert!(!still_live.is_expired());
    }

    #[test]
    fn extra_payload_fields_are_ignored() {
        let claims: Claims = serde_json::from_str(
            r#"{"sub":"4","role":"ATTENDEE","iat":100,"exp":200,"name":"Test User"}"#,
        )
        .unwrap();
        assert_eq!(claims.sub, "4");
        assert_eq!(claims.role, Role::Attendee);
    }

    #[test]
    fn missing_field_is_an_error() {
        assert!(serde_json::from_str::<Claims>(r#"{"sub":"4","iat":100,"exp":200}"#).is_err());
    }
}
