//! Request guard combining token verification with module access.

use steward_core::access::AccessEvaluator;
use steward_core::error::StewardResult;
use steward_core::models::module::Module;
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token::{Principal, verify_identity_token};

/// Extract the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` and a bare token. Blank values count as missing.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Authenticate the caller and check that their role may open `module`.
///
/// A missing or invalid token fails with `AuthenticationFailed`; a valid
/// token whose role does not grant `module` fails with
/// `AuthorizationDenied`.
pub fn require_module(
    authorization: Option<&str>,
    config: &AuthConfig,
    evaluator: &AccessEvaluator<'_>,
    module: Module,
) -> StewardResult<Principal> {
    let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;
    let principal = verify_identity_token(token, config)?;

    evaluator
        .can_navigate(principal.role(), module)
        .into_result()?;

    debug!(user_id = %principal.user_id, module = %module, "module access granted");
    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("  bearer abc  ")), Some("abc"));
        assert_eq!(bearer_token(Some("abc")), Some("abc"));
    }

    #[test]
    fn blank_header_is_missing() {
        assert_eq!(bearer_token(None), None);
        assert_eq!(bearer_token(Some("   ")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
    }
}
