//! Access-control service: sign-in and role guards.

use tourhub_core::error::TourResult;
use tourhub_core::models::role::Role;
use tourhub_core::repository::UserRepository;
use tracing::info;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::{self, AuthenticatedIdentity, AuthorizedIdentity};
use crate::token::{self, IdentityClaims};

/// Successful sign-in result.
#[derive(Debug)]
pub struct SessionGrant {
    /// Signed session token, to be stored in the session cookie.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Access-control service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AccessControl<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AccessControl<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Exchange a client-asserted identity for a session token.
    ///
    /// Only the email is required. No user record is created or looked
    /// up here; registration is a separate step.
    pub fn sign_in(&self, mut identity: IdentityClaims) -> Result<SessionGrant, AuthError> {
        identity.email = identity.email.trim().to_string();
        if identity.email.is_empty() {
            return Err(AuthError::InvalidClaims("email is required".into()));
        }

        let token = token::issue_session_token(&identity, &self.config)?;
        info!(email = %identity.email, "Session issued");

        Ok(SessionGrant {
            token,
            expires_in: self.config.session_lifetime_secs,
        })
    }

    /// Resolve the request credential into an authenticated identity.
    pub fn authenticate(&self, token: Option<&str>) -> Result<AuthenticatedIdentity, AuthError> {
        token::verify_session_token(token, &self.config)
    }

    pub async fn require_role(
        &self,
        identity: AuthenticatedIdentity,
        role: Role,
    ) -> TourResult<AuthorizedIdentity> {
        guard::require_role(&self.users, identity, role).await
    }

    pub async fn require_guide(
        &self,
        identity: AuthenticatedIdentity,
    ) -> TourResult<AuthorizedIdentity> {
        self.require_role(identity, Role::Guide).await
    }

    pub async fn require_admin(
        &self,
        identity: AuthenticatedIdentity,
    ) -> TourResult<AuthorizedIdentity> {
        self.require_role(identity, Role::Admin).await
    }
}
