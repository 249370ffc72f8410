//! Congregation member model, as consumed by dashboard statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub joined_on: NaiveDate,
    pub active: bool,
}
