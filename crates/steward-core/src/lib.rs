//! Steward Core — domain models, role-based module authorization and
//! event scheduling shared across all crates.
//!
//! The authorization pieces ([`RoleRegistry`], [`AccessEvaluator`]) and
//! the [`RecurrenceExpander`] are synchronous and pure. Persistence is
//! expressed through the async traits in [`repository`], implemented by
//! `steward-db`.

pub mod access;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod registry;
pub mod repository;
pub mod schedule;
pub mod services;
pub mod stats;

pub use access::{AccessDecision, AccessEvaluator, DenyReason, Gated};
pub use error::{StewardError, StewardResult};
pub use models::module::Module;
pub use models::role::Role;
pub use recurrence::{ExpansionLimits, RecurrenceExpander};
pub use registry::{ModulePermission, ModuleSet, RoleRegistry};
