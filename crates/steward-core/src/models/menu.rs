//! Navigation menu entries supplied by the presentation layer.

use serde::{Deserialize, Serialize};

use super::module::Module;
use crate::access::Gated;

/// One navigable entry. `path` and `label` are opaque to authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub module: Module,
    pub path: String,
    pub label: String,
}

impl MenuItem {
    pub fn new(module: Module, path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            module,
            path: path.into(),
            label: label.into(),
        }
    }
}

impl Gated for MenuItem {
    fn module(&self) -> Module {
        self.module
    }
}

/// Admin dashboard sidebar, in display order.
pub fn default_admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(Module::Dashboard, "/admin/dashboard", "Dashboard"),
        MenuItem::new(Module::Members, "/admin/members", "Members"),
        MenuItem::new(Module::Events, "/admin/events", "Events"),
        MenuItem::new(Module::Donations, "/admin/donations", "Donations"),
        MenuItem::new(Module::Resources, "/admin/resources", "Resources"),
        MenuItem::new(Module::Testimonials, "/admin/testimonials", "Testimonials"),
        MenuItem::new(Module::Notifications, "/admin/notifications", "Notifications"),
        MenuItem::new(Module::UserManagement, "/admin/users", "User Management"),
        MenuItem::new(Module::Settings, "/admin/settings", "Settings"),
    ]
}

/// Member portal navigation, in display order.
pub fn default_portal_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(Module::PortalDashboard, "/member-portal/dashboard", "Dashboard"),
        MenuItem::new(Module::PortalDonate, "/member-portal/donate", "Donate"),
        MenuItem::new(
            Module::PortalDonationHistory,
            "/member-portal/donation-history",
            "Donation History",
        ),
        MenuItem::new(Module::PortalEvents, "/member-portal/events", "Events"),
    ]
}
