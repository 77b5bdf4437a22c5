use crate::auth::claims::now_epoch;
use crate::auth::codec;
use crate::auth::role::Role;
use crate::auth::store::CredentialStore;
use tracing::debug;

/// On-demand view of the stored credential.
///
/// Nothing here is cached: every question re-reads the store, because the
/// slot can change between a view mounting and a protected action firing
/// (expiry elapses, another part of the UI logs out).
#[derive(Debug, Clone, Copy)]
pub struct SessionEvaluator<'a> {
    store: &'a CredentialStore,
}

impl<'a> SessionEvaluator<'a> {
    #[must_use]
    pub const fn new(store: &'a CredentialStore) -> Self {
        Self { store }
    }

    /// Role of the current session, or `None` when there is no credential or
    /// it does not decode. Decode errors never escalate past this point.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        let token = self.store.get()?;
        match codec::decode(&token) {
            Ok(claims) => Some(claims.role),
            Err(err) => {
                debug!("credential decode failed: {err}");
                None
            }
        }
    }

    /// Whether a live session exists.
    ///
    /// An undecodable or expired credential must not linger and be retried
    /// uselessly, so both cases clear the store as a side effect. Mere
    /// absence does not trigger a clear.
    #[must_use]
    pub fn is_live(&self) -> bool {
        let Some(token) = self.store.get() else {
            return false;
        };

        let claims = match codec::decode(&token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!("credential decode failed, clearing store: {err}");
                self.store.clear();
                return false;
            }
        };

        if claims.exp > now_epoch() {
            true
        } else {
            debug!("credential expired, clearing store");
            self.store.clear();
            false
        }
    }
}
