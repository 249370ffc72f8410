//! Module (feature area) domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StewardError;

/// A feature area subject to role gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Members,
    Events,
    Donations,
    Resources,
    Testimonials,
    Notifications,
    UserManagement,
    Settings,
    PortalDashboard,
    PortalDonate,
    PortalDonationHistory,
    PortalEvents,
}

impl Module {
    /// The full module catalog. Wildcard roles reach every entry here,
    /// including modules appended later.
    pub const ALL: [Module; 13] = [
        Module::Dashboard,
        Module::Members,
        Module::Events,
        Module::Donations,
        Module::Resources,
        Module::Testimonials,
        Module::Notifications,
        Module::UserManagement,
        Module::Settings,
        Module::PortalDashboard,
        Module::PortalDonate,
        Module::PortalDonationHistory,
        Module::PortalEvents,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Members => "members",
            Module::Events => "events",
            Module::Donations => "donations",
            Module::Resources => "resources",
            Module::Testimonials => "testimonials",
            Module::Notifications => "notifications",
            Module::UserManagement => "user_management",
            Module::Settings => "settings",
            Module::PortalDashboard => "portal_dashboard",
            Module::PortalDonate => "portal_donate",
            Module::PortalDonationHistory => "portal_donation_history",
            Module::PortalEvents => "portal_events",
        }
    }
}

impl FromStr for Module {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| StewardError::validation("module", format!("unknown module `{s}`")))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicates() {
        let mut names: Vec<_> = Module::ALL.iter().map(|m| m.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Module::ALL.len());
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(
            "user_management".parse::<Module>().unwrap(),
            Module::UserManagement
        );
        assert!("UserManagement".parse::<Module>().is_err());
    }

    #[test]
    fn serde_matches_as_str() {
        for module in Module::ALL {
            let json = serde_json::to_string(&module).unwrap();
            assert_eq!(json, format!("\"{}\"", module.as_str()));
        }
    }
}
