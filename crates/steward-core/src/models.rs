//! Domain models for Steward.
//!
//! These are the core types shared across all crates.

pub mod donation;
pub mod event;
pub mod member;
pub mod menu;
pub mod module;
pub mod role;
pub mod user;
