//! Authentication configuration.

/// Configuration for identity-token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// PEM-encoded Ed25519 public key of the identity provider.
    pub jwt_public_key_pem: String,
    /// PEM-encoded Ed25519 private key. Only needed by local tooling and
    /// tests that mint tokens; empty in production.
    pub jwt_private_key_pem: String,
    /// Expected `iss` claim.
    pub jwt_issuer: String,
    /// Lifetime of locally minted identity tokens in seconds
    /// (default: 3600 = 1 hour).
    pub identity_token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_public_key_pem: String::new(),
            jwt_private_key_pem: String::new(),
            jwt_issuer: "steward".into(),
            identity_token_lifetime_secs: 3600,
        }
    }
}
