//! Role domain model.
//!
//! Role strings arrive from the identity provider. They are normalized
//! exactly once, in [`Role::parse`]: surrounding whitespace is trimmed and
//! the remainder is matched case-sensitively. Anything unrecognized becomes
//! [`Role::Unknown`], which the registry maps to "no access".

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    EventsManager,
    FinanceManager,
    ResourceManager,
    ContentManager,
    /// Plain authenticated church member (member portal only).
    Member,
    /// Trimmed raw value of an unrecognized role string.
    Unknown(String),
}

impl Role {
    /// Every recognized role, in the order role pickers display them.
    pub const KNOWN: [Role; 6] = [
        Role::Admin,
        Role::EventsManager,
        Role::FinanceManager,
        Role::ResourceManager,
        Role::ContentManager,
        Role::Member,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "admin" => Role::Admin,
            "events_manager" => Role::EventsManager,
            "finance_manager" => Role::FinanceManager,
            "resource_manager" => Role::ResourceManager,
            "content_manager" => Role::ContentManager,
            "member" => Role::Member,
            other => Role::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::EventsManager => "events_manager",
            Role::FinanceManager => "finance_manager",
            Role::ResourceManager => "resource_manager",
            Role::ContentManager => "content_manager",
            Role::Member => "member",
            Role::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::parse(raw)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
