//! Steward Auth — identity-token verification, request guards and
//! temporary credential generation.
//!
//! Tokens are minted by the external identity provider. This crate only
//! verifies them and turns the `role` claim into a typed
//! [`Role`](steward_core::Role), so role strings are normalized in exactly
//! one place.

pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::require_module;
pub use token::{IdentityClaims, Principal, check_verification_key, verify_identity_token};
