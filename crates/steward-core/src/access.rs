//! Navigation and action gating.
//!
//! [`AccessEvaluator`] answers "may this (possibly absent) role open this
//! module?" against a borrowed [`RoleRegistry`]. A denial is an expected,
//! displayable outcome and is returned as [`AccessDecision::Deny`], not as
//! an error. Services that must abort call [`AccessDecision::into_result`].

use std::fmt;

use tracing::debug;

use crate::error::{StewardError, StewardResult};
use crate::models::menu::MenuItem;
use crate::models::module::Module;
use crate::models::role::Role;
use crate::registry::RoleRegistry;

/// Anything that belongs to a module and can therefore be gated.
pub trait Gated {
    fn module(&self) -> Module;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No role at all: the caller is not signed in.
    Unauthenticated,
    UnrecognizedRole(String),
    NotPermitted { role: String, module: Module },
    UnknownRoute(String),
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => f.write_str("you must be signed in to view this page"),
            DenyReason::UnrecognizedRole(raw) => {
                write!(f, "role `{raw}` is not recognized")
            }
            DenyReason::NotPermitted { role, module } => {
                write!(f, "{role} does not have permission to access {module}")
            }
            DenyReason::UnknownRoute(path) => write!(f, "no page is registered at `{path}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn into_result(self) -> StewardResult<()> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(DenyReason::Unauthenticated) => {
                Err(StewardError::AuthenticationFailed {
                    reason: DenyReason::Unauthenticated.to_string(),
                })
            }
            AccessDecision::Deny(reason) => Err(StewardError::AuthorizationDenied {
                reason: reason.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'r> {
    registry: &'r RoleRegistry,
}

impl<'r> AccessEvaluator<'r> {
    pub fn new(registry: &'r RoleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r RoleRegistry {
        self.registry
    }

    /// Decide whether `role` may open `module`. An absent role is denied
    /// everything.
    pub fn can_navigate(&self, role: Option<&Role>, module: Module) -> AccessDecision {
        let decision = match role {
            None => AccessDecision::Deny(DenyReason::Unauthenticated),
            Some(Role::Unknown(raw)) => {
                AccessDecision::Deny(DenyReason::UnrecognizedRole(raw.clone()))
            }
            Some(role) if self.registry.has_access(role, module) => AccessDecision::Allow,
            Some(role) => AccessDecision::Deny(DenyReason::NotPermitted {
                role: self.registry.display_name(role).to_string(),
                module,
            }),
        };

        if let AccessDecision::Deny(reason) = &decision {
            debug!(role = ?role.map(Role::as_str), %module, %reason, "Navigation denied");
        }
        decision
    }

    /// Keep only the entries `role` may open, in their original order.
    pub fn filter_menu<T: Gated + Clone>(&self, role: Option<&Role>, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.can_navigate(role, item.module()).is_allowed())
            .cloned()
            .collect()
    }

    /// Resolve a concrete route against a menu table. `path` matches an
    /// entry exactly or as a sub-path (`/admin/events/42`).
    pub fn module_for_path(menu: &[MenuItem], path: &str) -> Option<Module> {
        let path = path.trim_end_matches('/');
        menu.iter()
            .find(|item| {
                let base = item.path.trim_end_matches('/');
                path == base
                    || path
                        .strip_prefix(base)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(|item| item.module)
    }

    pub fn can_open_path(&self, role: Option<&Role>, menu: &[MenuItem], path: &str) -> AccessDecision {
        match Self::module_for_path(menu, path) {
            Some(module) => self.can_navigate(role, module),
            None => AccessDecision::Deny(DenyReason::UnknownRoute(path.to_string())),
        }
    }
}
