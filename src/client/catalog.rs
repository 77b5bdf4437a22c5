//! Resilient catalog fetcher.
//!
//! Two-tier fallback: auth-shaped responses (401/403) and transport failures
//! both degrade silently to a fixed local stand-in data set, because the
//! catalog view must never block on backend unavailability. Genuine
//! application-level failures (server errors, unparseable bodies) surface as
//! [`CatalogError::CatalogFetchFailed`] so they are not masked.

use crate::auth::session::SessionEvaluator;
use crate::auth::store::CredentialStore;
use crate::client::error::CatalogError;
use crate::client::{client, endpoint_url, with_bearer};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// An event record. Immutable once fetched; the write path for events is a
/// separate concern and not part of this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub attendees: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fetch the event catalog, attaching the stored credential when present.
///
/// An empty catalog is a valid answer.
///
/// # Errors
/// Returns [`CatalogError::CatalogFetchFailed`] only for application-level
/// failures; connectivity and auth-shaped failures return the stand-in set.
#[instrument(skip(store))]
pub async fn fetch_catalog(
    base: &str,
    store: &CredentialStore,
) -> Result<Vec<CatalogEntry>, CatalogError> {
    let client = match client() {
        Ok(client) => client,
        Err(err) => {
            warn!("client construction failed, using stand-in catalog: {err}");
            return Ok(stand_in_catalog());
        }
    };
    let url = endpoint_url(base, "/eventcards")?;

    let response = match with_bearer(client.get(&url), store).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("catalog transport failure, using stand-in catalog: {err}");
            return Ok(stand_in_catalog());
        }
    };

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        debug!("catalog requires auth the caller lacks, using stand-in catalog");
        return Ok(stand_in_catalog());
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::CatalogFetchFailed { status, body });
    }

    response
        .json()
        .await
        .map_err(|err| CatalogError::CatalogFetchFailed {
            status,
            body: err.to_string(),
        })
}

/// Fetch the catalog for a role-gated view.
///
/// The session can die while the request is in flight (logout elsewhere,
/// expiry). A response landing after that must not re-show gated content, so
/// liveness is re-evaluated after the await and a dead session discards the
/// result as `Ok(None)`.
///
/// # Errors
/// Same surface as [`fetch_catalog`].
pub async fn fetch_catalog_gated(
    base: &str,
    store: &CredentialStore,
) -> Result<Option<Vec<CatalogEntry>>, CatalogError> {
    let entries = fetch_catalog(base, store).await?;

    if SessionEvaluator::new(store).is_live() {
        Ok(Some(entries))
    } else {
        debug!("session ended while the catalog fetch was in flight, discarding");
        Ok(None)
    }
}

/// The fixed, non-authoritative stand-in data set.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn stand_in_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: 1,
            name: "Tech Conference 2025".to_string(),
            description: "Explore cutting-edge AI, Cloud Computing, and Blockchain innovations with industry leaders.".to_string(),
            category: "Conference".to_string(),
            date: "2025-11-15".to_string(),
            location: "San Francisco, CA".to_string(),
            price: 299.0,
            image: String::new(),
            organizer: Some("TechWorld Inc.".to_string()),
            rating: Some(4.8),
            attendees: Some(342),
            tags: vec!["AI".to_string(), "Blockchain".to_string(), "Cloud".to_string()],
        },
        CatalogEntry {
            id: 2,
            name: "Summer Music Festival".to_string(),
            description: "3-day outdoor music festival featuring top artists from around the world.".to_string(),
            category: "Concert".to_string(),
            date: "2025-12-01".to_string(),
            location: "Los Angeles, CA".to_string(),
            price: 150.0,
            image: String::new(),
            organizer: Some("MusicLive Events".to_string()),
            rating: Some(4.6),
            attendees: Some(1456),
            tags: vec!["Music".to_string(), "Festival".to_string(), "Outdoor".to_string()],
        },
        CatalogEntry {
            id: 3,
            name: "Startup Bootcamp".to_string(),
            description: "Intensive 2-day workshop on building and scaling your startup from idea to IPO.".to_string(),
            category: "Workshop".to_string(),
            date: "2025-10-25".to_string(),
            location: "New York, NY".to_string(),
            price: 199.0,
            image: String::new(),
            organizer: Some("StartupHub".to_string()),
            rating: Some(4.9),
            attendees: Some(89),
            tags: vec!["Startup".to_string(), "Business".to_string(), "Networking".to_string()],
        },
        CatalogEntry {
            id: 4,
            name: "Art & Design Expo".to_string(),
            description: "Contemporary art exhibition showcasing digital art, sculptures, and interactive installations.".to_string(),
            category: "Exhibition".to_string(),
            date: "2025-11-08".to_string(),
            location: "Chicago, IL".to_string(),
            price: 45.0,
            image: String::new(),
            organizer: Some("Modern Art Gallery".to_string()),
            rating: Some(4.4),
            attendees: Some(234),
            tags: vec!["Art".to_string(), "Design".to_string(), "Digital".to_string()],
        },
        CatalogEntry {
            id: 5,
            name: "Food & Wine Festival".to_string(),
            description: "Culinary celebration featuring world-class chefs, wine tastings, and gourmet experiences.".to_string(),
            category: "Festival".to_string(),
            date: "2025-12-15".to_string(),
            location: "Miami, FL".to_string(),
            price: 125.0,
            image: String::new(),
            organizer: Some("Culinary Events Co.".to_string()),
            rating: Some(4.7),
            attendees: Some(567),
            tags: vec!["Food".to_string(), "Wine".to_string(), "Culinary".to_string()],
        },
        CatalogEntry {
            id: 6,
            name: "Photography Workshop".to_string(),
            description: "Master the art of portrait and landscape photography with professional photographers.".to_string(),
            category: "Workshop".to_string(),
            date: "2025-10-30".to_string(),
            location: "Seattle, WA".to_string(),
            price: 89.0,
            image: String::new(),
            organizer: Some("Photo Masters".to_string()),
            rating: Some(4.8),
            attendees: Some(45),
            tags: vec!["Photography".to_string(), "Workshop".to_string(), "Creative".to_string()],
        },
    ]
}
