use crate::auth::role::Role;
use crate::auth::session::SessionEvaluator;
use crate::auth::store::CredentialStore;
use tracing::debug;

/// A named route or action and the roles allowed to exercise it.
///
/// An empty role set admits any live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityRequirement {
    pub name: &'static str,
    pub allowed_roles: &'static [Role],
}

impl CapabilityRequirement {
    /// Whether `role` satisfies the role restriction, ignoring liveness.
    #[must_use]
    pub fn admits(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }
}

/// Static route table, defined once at the access-control boundary.
pub const DASHBOARD: CapabilityRequirement = CapabilityRequirement {
    name: "dashboard",
    allowed_roles: &[],
};

pub const PURCHASE: CapabilityRequirement = CapabilityRequirement {
    name: "purchase",
    allowed_roles: &[],
};

pub const EVENT_CREATION: CapabilityRequirement = CapabilityRequirement {
    name: "event-creation",
    allowed_roles: &[Role::Admin, Role::Organizer],
};

pub const MANAGE_EVENTS: CapabilityRequirement = CapabilityRequirement {
    name: "manage-events",
    allowed_roles: &[Role::Admin, Role::Organizer],
};

pub const ADMIN_CONSOLE: CapabilityRequirement = CapabilityRequirement {
    name: "admin-console",
    allowed_roles: &[Role::Admin],
};

/// Permit/deny decisions for route entry.
///
/// Denial is a boolean signal, not an error; the routing layer decides the
/// consequence (typically a redirect to the login view).
#[derive(Debug, Clone, Copy)]
pub struct AccessAuthorizer<'a> {
    session: SessionEvaluator<'a>,
}

impl<'a> AccessAuthorizer<'a> {
    #[must_use]
    pub const fn new(store: &'a CredentialStore) -> Self {
        Self {
            session: SessionEvaluator::new(store),
        }
    }

    /// Decide whether the current session may exercise `requirement`.
    ///
    /// Re-evaluated from the store on every call; callers must not cache the
    /// answer across navigations.
    #[must_use]
    pub fn authorize(&self, requirement: &CapabilityRequirement) -> bool {
        if !self.session.is_live() {
            debug!("deny {}: no live session", requirement.name);
            return false;
        }

        let permitted = self
            .session
            .current_role()
            .is_some_and(|role| requirement.admits(role));

        if !permitted {
            debug!("deny {}: role not in allow-list", requirement.name);
        }

        permitted
    }
}
