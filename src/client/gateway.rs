//! Credential issuance gateway: registration and login.
//!
//! Login is a two-stage pipeline. Stage one is the remote service; stage two
//! is a fixed local directory of test identities, entered exactly once and
//! only on a transport-level failure. The classification is taken from typed
//! transport outcomes, never from error text: a send error means the service
//! was unreachable, a response with a rejection status means it was reached.
//! Conflating "wrong password" with "server down" would let a caller bypass
//! real authentication by forcing a local match, so a reachable rejection
//! always propagates as [`GatewayError::InvalidCredentials`].

use crate::auth::claims::Claims;
use crate::auth::codec;
use crate::auth::role::Role;
use crate::client::error::GatewayError;
use crate::client::{client, endpoint_url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

/// Lifetime of a locally synthesized credential.
const LOCAL_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Registration form forwarded to the remote service.
#[derive(Debug, Clone)]
pub struct RegistrationProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    /// Organizer accounts carry their organization name.
    pub organization: Option<String>,
}

/// Login form.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

/// Outcome of a successful login, remote or fallback.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub subject: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(rename = "userId")]
    user_id: Option<String>,
    role: Option<String>,
}

struct TestIdentity {
    email: &'static str,
    password: &'static str,
    role: Role,
    subject: &'static str,
}

/// Fixed directory of test identities for the offline fallback.
const TEST_DIRECTORY: [TestIdentity; 4] = [
    TestIdentity {
        email: "admin@test.com",
        password: "admin123",
        role: Role::Admin,
        subject: "1",
    },
    TestIdentity {
        email: "organizer@test.com",
        password: "org123",
        role: Role::Organizer,
        subject: "2",
    },
    TestIdentity {
        email: "attendee@test.com",
        password: "att123",
        role: Role::Attendee,
        subject: "3",
    },
    TestIdentity {
        email: "test@test.com",
        password: "test123",
        role: Role::Attendee,
        subject: "4",
    },
];

/// Register a new account.
///
/// # Errors
/// Returns [`GatewayError::RegistrationFailed`] on any non-2xx response, and
/// [`GatewayError::Unreachable`] when the service cannot be reached:
/// registration has no offline fallback.
#[instrument(skip(profile), fields(email = %profile.email))]
pub async fn register(base: &str, profile: &RegistrationProfile) -> Result<String, GatewayError> {
    let client = client().map_err(GatewayError::Unreachable)?;
    let url = endpoint_url(base, "/auth/register")?;

    let payload = json!({
        "firstName": profile.first_name,
        "lastName": profile.last_name,
        "phone": profile.phone,
        "email": profile.email,
        "password": profile.password.expose_secret(),
        "role": profile.role,
        "organization": profile.organization,
    });

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(GatewayError::Unreachable)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::RegistrationFailed { status, body });
    }

    // The service confirms with plain text.
    response.text().await.map_err(GatewayError::MalformedResponse)
}

/// Log in, preferring the remote service.
///
/// # Errors
/// Returns [`GatewayError::InvalidCredentials`] when a reachable service
/// rejects the credentials or when, after a transport failure, the local
/// directory has no match.
#[instrument(skip(credentials), fields(email = %credentials.email))]
pub async fn login(base: &str, credentials: &LoginCredentials) -> Result<IssuedCredential, GatewayError> {
    let client = client().map_err(GatewayError::Unreachable)?;
    let url = endpoint_url(base, "/auth/login")?;

    let payload = json!({
        "email": credentials.email,
        "password": credentials.password.expose_secret(),
    });

    let response = match client.post(&url).json(&payload).send().await {
        Ok(response) => response,
        Err(err) => {
            // Service unreachable: the one transition to the fallback stage.
            warn!("login transport failure, trying local directory: {err}");
            return directory_login(credentials);
        }
    };

    let status = response.status();
    if !status.is_success() {
        // Reachable rejection. Must never reach the local directory.
        let body = response.text().await.unwrap_or_default();
        debug!("login rejected: {status} - {body}");
        return Err(GatewayError::InvalidCredentials);
    }

    let body: LoginResponse = response.json().await.map_err(GatewayError::MalformedResponse)?;

    let role = match body.role.as_deref().map(str::parse::<Role>) {
        Some(Ok(role)) => Some(role),
        Some(Err(err)) => {
            debug!("login response carried an unusable role: {err}");
            None
        }
        None => None,
    };

    Ok(IssuedCredential {
        token: body.token,
        subject: body.user_id,
        role,
    })
}

/// Stage two: match against the fixed directory and synthesize a local-form
/// credential valid for 24 hours.
fn directory_login(credentials: &LoginCredentials) -> Result<IssuedCredential, GatewayError> {
    let identity = TEST_DIRECTORY
        .iter()
        .find(|identity| {
            identity.email == credentials.email
                && identity.password == credentials.password.expose_secret()
        })
        .ok_or(GatewayError::InvalidCredentials)?;

    debug!("local directory match for {}", identity.email);

    let claims = Claims::issue(
        identity.subject.to_string(),
        identity.role,
        LOCAL_TOKEN_TTL_SECS,
    );

    Ok(IssuedCredential {
        token: codec::encode_local(&claims),
        subject: Some(identity.subject.to_string()),
        role: Some(identity.role),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::now_epoch;
    use crate::client::tests::{can_bind_localhost, unreachable_base};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn attendee_credentials() -> LoginCredentials {
        LoginCredentials {
            email: "attendee@test.com".to_string(),
            password: SecretString::from("att123"),
        }
    }

    fn profile() -> RegistrationProfile {
        RegistrationProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
            password: SecretString::from("s3cret"),
            role: Role::Organizer,
            organization: Some("Analytical Events".to_string()),
        }
    }

    #[tokio::test]
    async fn login_uses_the_remote_service_when_reachable() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(
                json!({"email": "attendee@test.com", "password": "att123"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "remote-token",
                "userId": "17",
                "role": "attendee"
            })))
            .mount(&server)
            .await;

        let issued = login(&server.uri(), &attendee_credentials()).await.unwrap();
        assert_eq!(issued.token, "remote-token");
        assert_eq!(issued.subject.as_deref(), Some("17"));
        assert_eq!(issued.role, Some(Role::Attendee));
    }

    #[tokio::test]
    async fn reachable_rejection_never_falls_back_to_the_directory() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        // These credentials WOULD match the local directory; a reachable 401
        // must still win.
        let err = login(&server.uri(), &attendee_credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidCredentials));
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_the_directory() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let issued = login(&unreachable_base(), &attendee_credentials())
            .await
            .unwrap();

        let claims = codec::decode(&issued.token).unwrap();
        assert_eq!(claims.role, Role::Attendee);
        assert_eq!(claims.sub, "3");
        assert!(claims.exp > now_epoch());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(issued.subject.as_deref(), Some("3"));
        assert!(codec::is_local_form(&issued.token));
    }

    #[tokio::test]
    async fn transport_failure_with_wrong_password_is_invalid_credentials() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let credentials = LoginCredentials {
            email: "attendee@test.com".to_string(),
            password: SecretString::from("wrong"),
        };
        let err = login(&unreachable_base(), &credentials).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidCredentials));
    }

    #[tokio::test]
    async fn register_returns_the_confirmation_text() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_string("Registered"))
            .mount(&server)
            .await;

        let confirmation = register(&server.uri(), &profile()).await.unwrap();
        assert_eq!(confirmation, "Registered");
    }

    #[tokio::test]
    async fn register_rejection_carries_status_and_body() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(409).set_body_string("email already taken"))
            .mount(&server)
            .await;

        let err = register(&server.uri(), &profile()).await.unwrap_err();
        match err {
            GatewayError::RegistrationFailed { status, body } => {
                assert_eq!(status.as_u16(), 409);
                assert_eq!(body, "email already taken");
            }
            other => panic!("expected RegistrationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_has_no_offline_fallback() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let err = register(&unreachable_base(), &profile()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)));
    }
}
