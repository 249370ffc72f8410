//! Server configuration assembled from `STEWARD_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use steward_auth::AuthConfig;
use steward_core::error::{StewardError, StewardResult};
use steward_core::recurrence::ExpansionLimits;
use steward_db::DbConfig;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub limits: ExpansionLimits,
    /// Optional JSON document overriding the built-in role matrix.
    pub roles_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment. Unset variables
    /// keep their defaults.
    pub fn from_env() -> StewardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StewardResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("STEWARD_DB_URL") {
            config.db.url = v;
        }
        if let Some(v) = get("STEWARD_DB_NAMESPACE") {
            config.db.namespace = v;
        }
        if let Some(v) = get("STEWARD_DB_DATABASE") {
            config.db.database = v;
        }
        if let Some(v) = get("STEWARD_DB_USERNAME") {
            config.db.username = v;
        }
        if let Some(v) = get("STEWARD_DB_PASSWORD") {
            config.db.password = v;
        }

        if let Some(v) = get("STEWARD_JWT_PUBLIC_KEY") {
            config.auth.jwt_public_key_pem = v;
        }
        if let Some(v) = get("STEWARD_JWT_ISSUER") {
            config.auth.jwt_issuer = v;
        }

        if let Some(v) = get("STEWARD_MAX_EVENT_INSTANCES") {
            config.limits.max_instances = parse("STEWARD_MAX_EVENT_INSTANCES", &v)?;
        }
        config.roles_file = get("STEWARD_ROLES_FILE").map(PathBuf::from);

        Ok(config)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> StewardResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| StewardError::validation(key, format!("invalid value {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db.namespace, "steward");
        assert_eq!(config.auth.jwt_issuer, "steward");
        assert_eq!(config.limits.max_instances, 1000);
        assert!(config.roles_file.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("STEWARD_DB_URL", "db.internal:8000"),
            ("STEWARD_JWT_ISSUER", "https://id.example.org"),
            ("STEWARD_JWT_PUBLIC_KEY", "-----BEGIN PUBLIC KEY-----\nabc\n-----END PUBLIC KEY-----"),
            ("STEWARD_MAX_EVENT_INSTANCES", " 250 "),
            ("STEWARD_ROLES_FILE", "/etc/steward/roles.json"),
            ("STEWARD_DB_PASSWORD", "  "),
        ]))
        .unwrap();

        assert_eq!(config.db.url, "db.internal:8000");
        assert_eq!(config.db.password, "root");
        assert_eq!(config.auth.jwt_issuer, "https://id.example.org");
        assert!(config.auth.jwt_public_key_pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        assert_eq!(config.limits.max_instances, 250);
        assert_eq!(
            config.roles_file.as_deref(),
            Some(std::path::Path::new("/etc/steward/roles.json"))
        );
    }

    #[test]
    fn malformed_number_names_the_variable() {
        let err = ServerConfig::from_lookup(lookup(&[("STEWARD_MAX_EVENT_INSTANCES", "lots")]))
            .unwrap_err();
        match err {
            StewardError::Validation { field, .. } => {
                assert_eq!(field, "STEWARD_MAX_EVENT_INSTANCES")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
