//! Donation domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    /// Donating member, if the gift was recorded against one.
    pub member_id: Option<Uuid>,
    pub donor_name: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Fund or purpose, e.g. `tithe`, `building`.
    pub category: String,
    pub method: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonation {
    pub member_id: Option<Uuid>,
    pub donor_name: String,
    pub amount: i64,
    pub category: String,
    pub method: String,
    pub date: NaiveDate,
}
