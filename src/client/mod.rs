//! Remote service client.
//!
//! All requests go through one [`reqwest::Client`] construction path with the
//! crate user agent, and URLs are normalized through [`endpoint_url`] so the
//! base path (`/api`) configured for the service is preserved.

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod user;

use crate::auth::store::CredentialStore;
use error::EndpointError;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

pub(crate) static APP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub(crate) fn client() -> reqwest::Result<Client> {
    Client::builder().user_agent(APP_USER_AGENT).build()
}

/// Resolve `path` against the configured base URL.
///
/// # Errors
/// Returns an error if `base` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(base: &str, path: &str) -> Result<String, EndpointError> {
    let url = Url::parse(base)?;

    let scheme = url.scheme();

    let host = url.host().ok_or(EndpointError::MissingHost)?.to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(EndpointError::UnsupportedScheme(scheme.to_string())),
        },
    };

    let base_path = url.path().trim_end_matches('/');

    let endpoint_url = format!("{scheme}://{host}:{port}{base_path}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

/// Attach the stored credential as a bearer header, when present.
pub(crate) fn with_bearer(request: RequestBuilder, store: &CredentialStore) -> RequestBuilder {
    match store.get() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Liveness probe for the remote service.
///
/// A 2xx counts, and so does 403: the service is present, it just requires
/// auth this caller lacks. Anything else, including transport failure, is
/// "absent".
#[instrument(skip(store))]
pub async fn service_present(base: &str, store: &CredentialStore) -> bool {
    let Ok(client) = client() else {
        return false;
    };
    let Ok(url) = endpoint_url(base, "/health") else {
        return false;
    };

    match with_bearer(client.get(&url), store).send().await {
        Ok(response) => {
            let status = response.status();
            status.is_success() || status == StatusCode::FORBIDDEN
        }
        Err(err) => {
            warn!("health probe failed: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::tests::scratch_store;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    /// A URL pointing at a port nothing listens on.
    pub(crate) fn unreachable_base() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/api")
    }

    #[test]
    fn endpoint_url_preserves_the_base_path() {
        assert_eq!(
            endpoint_url("http://localhost:8081/api", "/eventcards").unwrap(),
            "http://localhost:8081/api/eventcards"
        );
        assert_eq!(
            endpoint_url("https://events.example.com", "/health").unwrap(),
            "https://events.example.com:443/health"
        );
        assert_eq!(
            endpoint_url("http://localhost/api/", "/auth/login").unwrap(),
            "http://localhost:80/api/auth/login"
        );
    }

    #[test]
    fn endpoint_url_rejects_bad_bases() {
        assert!(endpoint_url("not a url", "/health").is_err());
        assert!(matches!(
            endpoint_url("ftp://host/api", "/health"),
            Err(EndpointError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            endpoint_url("unix:/run/api.sock", "/health"),
            Err(EndpointError::MissingHost)
        ));
    }

    #[tokio::test]
    async fn service_present_accepts_ok_and_forbidden() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let store = scratch_store("health-ok");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        assert!(service_present(&server.uri(), &store).await);

        let forbidden = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&forbidden)
            .await;
        assert!(service_present(&forbidden.uri(), &store).await);
    }

    #[tokio::test]
    async fn service_present_is_false_when_unreachable() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let store = scratch_store("health-down");
        assert!(!service_present(&unreachable_base(), &store).await);
    }
}
