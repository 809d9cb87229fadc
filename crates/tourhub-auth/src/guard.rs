//! Capability types for the access-control chain.
//!
//! A role check takes an [`AuthenticatedIdentity`] by value, so it cannot
//! run before authentication did.

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::role::Role;
use tourhub_core::models::user::User;
use tourhub_core::repository::UserRepository;
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::token::{IdentityClaims, SessionClaims};

/// Verified session claims. Only token verification can construct one.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    claims: SessionClaims,
}

impl AuthenticatedIdentity {
    pub(crate) fn new(claims: SessionClaims) -> Self {
        Self { claims }
    }

    pub fn email(&self) -> &str {
        &self.claims.identity.email
    }

    pub fn name(&self) -> Option<&str> {
        self.claims.identity.name.as_deref()
    }

    pub fn identity(&self) -> &IdentityClaims {
        &self.claims.identity
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}

/// An authenticated identity whose stored role matched a guard.
#[derive(Debug, Clone)]
pub struct AuthorizedIdentity {
    identity: AuthenticatedIdentity,
    role: Role,
    /// `None` only when a tourist guard passed for an unregistered email.
    user: Option<User>,
}

impl AuthorizedIdentity {
    pub fn email(&self) -> &str {
        self.identity.email()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.identity
    }
}

/// Check that the stored role of `identity` equals `required`.
///
/// The user record is fetched on every call so a role change takes
/// effect on the next request. An email with no user record counts as a
/// plain tourist.
pub async fn require_role<U: UserRepository>(
    users: &U,
    identity: AuthenticatedIdentity,
    required: Role,
) -> TourResult<AuthorizedIdentity> {
    let user = match users.get_by_email(identity.email()).await {
        Ok(user) => Some(user),
        Err(TourError::NotFound { .. }) => None,
        Err(e) => return Err(e),
    };

    let actual = user.as_ref().map(User::effective_role).unwrap_or_default();
    if actual != required {
        debug!(email = %identity.email(), %required, %actual, "Role guard denied request");
        return Err(AuthError::RoleMismatch { required, actual }.into());
    }

    Ok(AuthorizedIdentity {
        identity,
        role: actual,
        user,
    })
}
