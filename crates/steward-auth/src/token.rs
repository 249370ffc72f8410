//! Identity-token verification.
//!
//! The identity provider issues EdDSA (Ed25519) JWTs carrying the user's
//! dashboard `role`. [`verify_identity_token`] is the single point where
//! that claim becomes a [`Role`].

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use steward_core::models::role::Role;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims carried by every identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: opaque user identifier from the identity provider.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Raw role string. Absent for users who were never given one.
    #[serde(default)]
    pub role: Option<String>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Token id. Locally minted tokens carry one; provider tokens may not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// The authenticated caller, with the role already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: Option<String>,
    /// `None` when the token carried no (or a blank) role claim.
    pub role: Option<Role>,
}

impl Principal {
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }
}

impl From<IdentityClaims> for Principal {
    fn from(claims: IdentityClaims) -> Self {
        let role = claims
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(Role::parse);
        Self {
            user_id: claims.sub,
            email: claims.email,
            role,
        }
    }
}

/// Mint a signed identity token. Production tokens come from the identity
/// provider; this exists for local tooling and tests.
pub fn issue_identity_token(
    user_id: &str,
    email: Option<&str>,
    role: Option<&str>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = IdentityClaims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        role: role.map(str::to_string),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.identity_token_lifetime_secs as i64,
        jti: Some(Uuid::new_v4().to_string()),
    };

    let key = EncodingKey::from_ed_pem(config.jwt_private_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad private key: {e}")))?;

    let header = Header::new(Algorithm::EdDSA);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

fn decoding_key(config: &AuthConfig) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_ed_pem(config.jwt_public_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad public key: {e}")))
}

/// Fail fast on a verification key that will never accept a token.
pub fn check_verification_key(config: &AuthConfig) -> Result<(), AuthError> {
    if config.jwt_public_key_pem.trim().is_empty() {
        return Err(AuthError::Crypto("no identity-provider public key configured".into()));
    }
    decoding_key(config).map(|_| ())
}

/// Decode and verify an identity token (signature, expiry, issuer).
pub fn decode_identity_token(
    token: &str,
    config: &AuthConfig,
) -> Result<IdentityClaims, AuthError> {
    let key = decoding_key(config)?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<IdentityClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Verify `token` and return the caller it identifies.
pub fn verify_identity_token(token: &str, config: &AuthConfig) -> Result<Principal, AuthError> {
    decode_identity_token(token, config).map(Principal::from)
}
