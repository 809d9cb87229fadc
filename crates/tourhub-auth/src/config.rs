//! Authentication configuration.

/// Default session lifetime: 24 hours.
pub const DEFAULT_SESSION_LIFETIME_SECS: u64 = 86_400;

/// Configuration for session token handling.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide HMAC secret used to sign session tokens (HS256).
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 86_400 = 24 hours).
    pub session_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
        }
    }
}
