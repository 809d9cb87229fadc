//! TourHub Auth: session token issuance/verification and role guards.
//!
//! Guards are capability values: [`verify_session_token`] yields an
//! [`AuthenticatedIdentity`], and only that value can be turned into an
//! [`AuthorizedIdentity`] by a role check.

pub mod config;
pub mod error;
pub mod guard;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::{AuthenticatedIdentity, AuthorizedIdentity, require_role};
pub use service::{AccessControl, SessionGrant};
pub use token::{IdentityClaims, SessionClaims, verify_session_token};
