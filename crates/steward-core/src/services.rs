//! Access-gated workflows built on the repository traits.

pub mod event;
pub mod user;

pub use event::{BatchFailure, BatchReport, EventService};
pub use user::UserAdminService;
