//! SurrealDB repository implementations.

mod donation;
mod event;
mod user_profile;

pub use donation::SurrealDonationRepository;
pub use event::SurrealEventRepository;
pub use user_profile::SurrealUserProfileRepository;

use chrono::NaiveDate;
use steward_core::models::event::DATE_FORMAT;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_uuid(entity: &'static str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode {
        entity,
        message: format!("invalid UUID `{raw}`: {e}"),
    })
}

fn parse_date(entity: &'static str, raw: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| DbError::Decode {
        entity,
        message: format!("invalid date `{raw}`: {e}"),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
