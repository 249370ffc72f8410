//! Static role → module permission matrix.
//!
//! A [`RoleRegistry`] is built once at process start, either from the
//! shipped matrix ([`RoleRegistry::builtin`]) or from a JSON override
//! ([`RoleRegistry::from_json`]), and then shared by reference. It is never
//! mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{StewardError, StewardResult};
use crate::models::module::Module;
use crate::models::role::Role;

const WILDCARD: &str = "all";

/// The set of modules a role may open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub enum ModuleSet {
    /// Every module in the catalog, including ones added later.
    All,
    Only(BTreeSet<Module>),
}

impl ModuleSet {
    pub fn only(modules: impl IntoIterator<Item = Module>) -> Self {
        ModuleSet::Only(modules.into_iter().collect())
    }

    pub fn contains(&self, module: Module) -> bool {
        match self {
            ModuleSet::All => true,
            ModuleSet::Only(set) => set.contains(&module),
        }
    }

    /// Expand to a concrete set against the current catalog.
    pub fn to_set(&self) -> BTreeSet<Module> {
        match self {
            ModuleSet::All => Module::ALL.into_iter().collect(),
            ModuleSet::Only(set) => set.clone(),
        }
    }
}

impl TryFrom<Vec<String>> for ModuleSet {
    type Error = StewardError;

    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        if raw.iter().any(|m| m == WILDCARD) {
            if raw.len() > 1 {
                return Err(StewardError::validation(
                    "modules",
                    "`all` cannot be combined with explicit modules",
                ));
            }
            return Ok(ModuleSet::All);
        }
        raw.iter()
            .map(|m| m.parse::<Module>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(ModuleSet::Only)
    }
}

impl From<ModuleSet> for Vec<String> {
    fn from(set: ModuleSet) -> Self {
        match set {
            ModuleSet::All => vec![WILDCARD.to_string()],
            ModuleSet::Only(set) => set.into_iter().map(|m| m.as_str().to_string()).collect(),
        }
    }
}

/// Display metadata and module grant for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    pub name: String,
    pub description: String,
    pub modules: ModuleSet,
}

/// Value/label/description triple for role pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    version: u32,
    roles: BTreeMap<Role, ModulePermission>,
}

impl RoleRegistry {
    /// The role matrix shipped with Steward.
    pub fn builtin() -> Self {
        use Module::*;

        let entry = |name: &str, description: &str, modules: ModuleSet| ModulePermission {
            name: name.into(),
            description: description.into(),
            modules,
        };

        let roles = BTreeMap::from([
            (
                Role::Admin,
                entry("Administrator", "Full access to all features", ModuleSet::All),
            ),
            (
                Role::EventsManager,
                entry(
                    "Events Manager",
                    "Manage events and view dashboard",
                    ModuleSet::only([Dashboard, Events, Notifications, Settings]),
                ),
            ),
            (
                Role::FinanceManager,
                entry(
                    "Finance Manager",
                    "Manage donations and financial reports",
                    ModuleSet::only([Dashboard, Donations, Notifications, Settings]),
                ),
            ),
            (
                Role::ResourceManager,
                entry(
                    "Resource Manager",
                    "Manage articles, resources, and educational content",
                    ModuleSet::only([Dashboard, Resources, Notifications, Settings]),
                ),
            ),
            (
                Role::ContentManager,
                entry(
                    "Content Manager",
                    "Manage testimonials shown on the public site",
                    ModuleSet::only([Testimonials]),
                ),
            ),
            (
                Role::Member,
                entry(
                    "Member",
                    "Member portal access",
                    ModuleSet::only([
                        PortalDashboard,
                        PortalDonate,
                        PortalDonationHistory,
                        PortalEvents,
                    ]),
                ),
            ),
        ]);

        Self { version: 1, roles }
    }

    /// Load a registry from a JSON document of the form
    /// `{"version": 2, "roles": {"admin": {"name": .., "description": ..,
    /// "modules": ["all"]}, ..}}`.
    ///
    /// Only recognized roles may appear. `admin` must hold the wildcard and
    /// every other role an explicit list.
    pub fn from_json(json: &str) -> StewardResult<Self> {
        let registry: RoleRegistry = serde_json::from_str(json)
            .map_err(|e| StewardError::validation("roles", e.to_string()))?;
        registry.check()?;
        Ok(registry)
    }

    fn check(&self) -> StewardResult<()> {
        for (role, permission) in &self.roles {
            match (role, &permission.modules) {
                (Role::Unknown(raw), _) => {
                    return Err(StewardError::validation(
                        "roles",
                        format!("unrecognized role `{raw}`"),
                    ));
                }
                (Role::Admin, ModuleSet::All) => {}
                (Role::Admin, ModuleSet::Only(_)) => {
                    return Err(StewardError::validation(
                        "roles.admin.modules",
                        "admin must be granted the `all` wildcard",
                    ));
                }
                (other, ModuleSet::All) => {
                    return Err(StewardError::validation(
                        format!("roles.{other}.modules"),
                        "only admin may hold the `all` wildcard",
                    ));
                }
                _ => {}
            }
        }
        if !self.roles.contains_key(&Role::Admin) {
            return Err(StewardError::validation(
                "roles.admin",
                "admin must be present with the `all` wildcard",
            ));
        }
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn permission(&self, role: &Role) -> Option<&ModulePermission> {
        self.roles.get(role)
    }

    /// Modules `role` may open. Unrecognized roles get the empty set.
    pub fn modules_for(&self, role: &Role) -> BTreeSet<Module> {
        self.permission(role)
            .map(|p| p.modules.to_set())
            .unwrap_or_default()
    }

    pub fn has_access(&self, role: &Role, module: Module) -> bool {
        self.permission(role)
            .is_some_and(|p| p.modules.contains(module))
    }

    pub fn is_wildcard(&self, role: &Role) -> bool {
        self.permission(role)
            .is_some_and(|p| p.modules == ModuleSet::All)
    }

    /// Human-readable role name, falling back to the raw role string.
    pub fn display_name<'a>(&'a self, role: &'a Role) -> &'a str {
        self.permission(role)
            .map(|p| p.name.as_str())
            .unwrap_or_else(|| role.as_str())
    }

    /// Role description, or `""` when the role is unrecognized.
    pub fn description(&self, role: &Role) -> &str {
        self.permission(role)
            .map(|p| p.description.as_str())
            .unwrap_or_default()
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.keys()
    }

    pub fn role_options(&self) -> Vec<RoleOption> {
        self.roles
            .iter()
            .map(|(role, p)| RoleOption {
                value: role.as_str().to_string(),
                label: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_role_reaches_every_module() {
        let registry = RoleRegistry::builtin();
        assert!(registry.is_wildcard(&Role::Admin));
        for module in Module::ALL {
            assert!(registry.has_access(&Role::Admin, module), "{module}");
        }
        assert_eq!(registry.modules_for(&Role::Admin).len(), Module::ALL.len());
    }

    #[test]
    fn explicit_roles_match_their_module_set() {
        let registry = RoleRegistry::builtin();
        for role in registry.roles().filter(|r| !registry.is_wildcard(r)) {
            let allowed = registry.modules_for(role);
            for module in Module::ALL {
                assert_eq!(
                    registry.has_access(role, module),
                    allowed.contains(&module),
                    "{role} / {module}"
                );
            }
        }
    }

    #[test]
    fn events_manager_matrix() {
        let registry = RoleRegistry::builtin();
        let role = Role::EventsManager;
        assert!(registry.has_access(&role, Module::Events));
        assert!(registry.has_access(&role, Module::Dashboard));
        assert!(!registry.has_access(&role, Module::Donations));
        assert!(!registry.has_access(&role, Module::UserManagement));
    }

    #[test]
    fn unknown_role_has_no_modules() {
        let registry = RoleRegistry::builtin();
        let role = Role::parse("deacon");
        assert!(registry.modules_for(&role).is_empty());
        for module in Module::ALL {
            assert!(!registry.has_access(&role, module));
        }
    }

    #[test]
    fn whitespace_around_role_is_ignored() {
        let registry = RoleRegistry::builtin();
        for module in Module::ALL {
            assert_eq!(
                registry.has_access(&Role::parse(" admin "), module),
                registry.has_access(&Role::parse("admin"), module)
            );
            assert_eq!(
                registry.has_access(&Role::parse("\tfinance_manager\n"), module),
                registry.has_access(&Role::parse("finance_manager"), module)
            );
        }
    }

    #[test]
    fn display_name_and_description_fall_back() {
        let registry = RoleRegistry::builtin();
        assert_eq!(registry.display_name(&Role::FinanceManager), "Finance Manager");
        let unknown = Role::parse(" deacon ");
        assert_eq!(registry.display_name(&unknown), "deacon");
        assert_eq!(registry.description(&unknown), "");
    }

    #[test]
    fn role_options_follow_role_order() {
        let registry = RoleRegistry::builtin();
        let values: Vec<_> = registry
            .role_options()
            .into_iter()
            .map(|o| o.value)
            .collect();
        let expected: Vec<_> = Role::KNOWN.iter().map(|r| r.as_str().to_string()).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn json_round_trip_preserves_matrix() {
        let registry = RoleRegistry::builtin();
        let json = serde_json::to_string(&registry).unwrap();
        let loaded = RoleRegistry::from_json(&json).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn from_json_rejects_unknown_roles() {
        let json = r#"{"version": 2, "roles": {
            "deacon": {"name": "Deacon", "description": "", "modules": ["events"]}
        }}"#;
        assert!(matches!(
            RoleRegistry::from_json(json),
            Err(StewardError::Validation { .. })
        ));
    }

    #[test]
    fn from_json_requires_admin_wildcard() {
        let json = r#"{"version": 2, "roles": {
            "admin": {"name": "Administrator", "description": "", "modules": ["events"]}
        }}"#;
        assert!(RoleRegistry::from_json(json).is_err());

        let json = r#"{"version": 2, "roles": {
            "admin": {"name": "Administrator", "description": "", "modules": ["all"]},
            "member": {"name": "Member", "description": "", "modules": ["all"]}
        }}"#;
        assert!(RoleRegistry::from_json(json).is_err());
    }

    #[test]
    fn from_json_requires_admin_entry() {
        let json = r#"{"version": 2, "roles": {
            "member": {"name": "Member", "description": "", "modules": ["portal_events"]}
        }}"#;
        match RoleRegistry::from_json(json) {
            Err(StewardError::Validation { field, .. }) => assert_eq!(field, "roles.admin"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_unknown_modules() {
        let json = r#"{"version": 2, "roles": {
            "admin": {"name": "Administrator", "description": "", "modules": ["all"]},
            "member": {"name": "Member", "description": "", "modules": ["choir"]}
        }}"#;
        assert!(RoleRegistry::from_json(json).is_err());
    }

    #[test]
    fn wildcard_cannot_hide_unknown_modules() {
        let json = r#"{"version": 2, "roles": {
            "admin": {"name": "Administrator", "description": "", "modules": ["all", "choir"]}
        }}"#;
        assert!(RoleRegistry::from_json(json).is_err());

        let json = r#"{"version": 2, "roles": {
            "admin": {"name": "Administrator", "description": "", "modules": ["all", "events"]}
        }}"#;
        assert!(RoleRegistry::from_json(json).is_err());
    }

    #[test]
    fn content_manager_only_reaches_testimonials() {
        let registry = RoleRegistry::builtin();
        let allowed = registry.modules_for(&Role::ContentManager);
        assert_eq!(allowed, BTreeSet::from([Module::Testimonials]));
        assert!(!registry.has_access(&Role::ContentManager, Module::Dashboard));
    }

    #[test]
    fn custom_registry_keeps_version() {
        let json = r#"{"version": 7, "roles": {
            "admin": {"name": "Pastor", "description": "Everything", "modules": ["all"]},
            "member": {"name": "Member", "description": "", "modules": ["portal_events"]}
        }}"#;
        let registry = RoleRegistry::from_json(json).unwrap();
        assert_eq!(registry.version(), 7);
        assert_eq!(registry.display_name(&Role::Admin), "Pastor");
        assert!(registry.has_access(&Role::Member, Module::PortalEvents));
        assert!(!registry.has_access(&Role::Member, Module::PortalDonate));
        assert!(!registry.has_access(&Role::EventsManager, Module::Events));
    }
}
