use crate::auth::store::CredentialStore;
use crate::client::{client, endpoint_url};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::instrument;

/// Profile returned by the user lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Fetch a user profile. Unlike the catalog, this endpoint has no fallback:
/// the bearer credential is mandatory and any failure is an error.
///
/// # Errors
/// Returns an error when no credential is stored, the request fails, or the
/// service answers non-2xx.
#[instrument(skip(store))]
pub async fn fetch_user(base: &str, store: &CredentialStore, id: &str) -> Result<UserProfile> {
    let token = store
        .get()
        .ok_or_else(|| anyhow!("no credential stored"))?;

    let client = client()?;
    let url = endpoint_url(base, &format!("/users/{id}"))?;

    let response = client.get(&url).bearer_auth(token).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("{} - {}, {}", url, status, body));
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::tests::scratch_store;
    use crate::client::tests::can_bind_localhost;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_user_requires_a_stored_credential() {
        let store = scratch_store("user-no-token");
        assert!(fetch_user("http://localhost:8081/api", &store, "7")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn fetch_user_attaches_the_bearer_and_parses_the_profile() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let store = scratch_store("user-ok");
        store.put("tok-7", Some("7")).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .and(header("Authorization", "Bearer tok-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Organizer User",
                "email": "organizer@test.com",
                "organization": "MusicLive Events",
                "roles": ["ORGANIZER"]
            })))
            .mount(&server)
            .await;

        let profile = fetch_user(&server.uri(), &store, "7").await.unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.roles, vec!["ORGANIZER".to_string()]);
        store.clear();
    }

    #[tokio::test]
    async fn non_success_is_an_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let store = scratch_store("user-404");
        store.put("tok-x", None).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
            .mount(&server)
            .await;

        assert!(fetch_user(&server.uri(), &store, "99").await.is_err());
        store.clear();
    }
}
