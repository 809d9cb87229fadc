//! HS256 session token issuance and verification.
//!
//! Tokens are stateless: validity is the signature plus the `exp`
//! claim. There is no server-side session table, so a token stays valid
//! until it expires even after the client logs out.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::AuthenticatedIdentity;

/// Identity asserted by the client at sign-in and carried in every
/// session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            photo_url: None,
        }
    }
}

/// Full JWT payload: the identity plus registered claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: IdentityClaims,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// Issue a signed session token valid for the configured lifetime.
pub fn issue_session_token(
    identity: &IdentityClaims,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    issue_session_token_at(identity, Utc::now(), config)
}

/// Issue a session token as if it had been signed at `issued_at`.
pub fn issue_session_token_at(
    identity: &IdentityClaims,
    issued_at: DateTime<Utc>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    if config.jwt_secret.is_empty() {
        return Err(AuthError::Crypto("signing secret is not configured".into()));
    }

    let iat = issued_at.timestamp();
    let claims = SessionClaims {
        identity: identity.clone(),
        iat,
        exp: iat + config.session_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a session token (signature and expiry).
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "iat"]);
    validation.leeway = 0;

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Authenticate a request credential.
///
/// `None` or an empty string is `TokenMissing`. This is the only way to
/// obtain an [`AuthenticatedIdentity`].
pub fn verify_session_token(
    token: Option<&str>,
    config: &AuthConfig,
) -> Result<AuthenticatedIdentity, AuthError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::TokenMissing)?;
    decode_session_token(token, config).map(AuthenticatedIdentity::new)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-with-enough-entropy".into(),
            session_lifetime_secs: 86_400,
        }
    }

    fn alice() -> IdentityClaims {
        IdentityClaims {
            email: "alice@example.com".into(),
            name: Some("Alice".into()),
            photo_url: Some("https://img.example.com/alice.png".into()),
        }
    }

    #[test]
    fn token_roundtrip_preserves_identity() {
        let config = test_config();
        let token = issue_session_token(&alice(), &config).unwrap();
        let claims = decode_session_token(&token, &config).unwrap();

        assert_eq!(claims.identity, alice());
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn identity_without_optional_fields_roundtrips() {
        let config = test_config();
        let identity = IdentityClaims::new("bob@example.com");
        let token = issue_session_token(&identity, &config).unwrap();

        let verified = verify_session_token(Some(&token), &config).unwrap();
        assert_eq!(verified.identity(), &identity);
    }

    #[test]
    fn jti_is_unique() {
        let config = test_config();
        let t1 = issue_session_token(&alice(), &config).unwrap();
        let t2 = issue_session_token(&alice(), &config).unwrap();

        let c1 = decode_session_token(&t1, &config).unwrap();
        let c2 = decode_session_token(&t2, &config).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::hours(25);
        let token = issue_session_token_at(&alice(), issued_at, &config).unwrap();

        let err = decode_session_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn token_inside_window_is_accepted() {
        let config = test_config();
        let issued_at = Utc::now() - Duration::hours(23);
        let token = issue_session_token_at(&alice(), issued_at, &config).unwrap();

        assert!(decode_session_token(&token, &config).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = issue_session_token(&alice(), &test_config()).unwrap();
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..test_config()
        };

        let err = decode_session_token(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = decode_session_token("not.a.jwt", &test_config()).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn missing_token_is_reported() {
        let config = test_config();
        assert!(matches!(
            verify_session_token(None, &config).unwrap_err(),
            AuthError::TokenMissing
        ));
        assert!(matches!(
            verify_session_token(Some(""), &config).unwrap_err(),
            AuthError::TokenMissing
        ));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let config = AuthConfig::default();
        let err = issue_session_token(&alice(), &config).unwrap_err();
        assert!(matches!(err, AuthError::Crypto(_)));
    }
}
