//! SurrealDB implementation of [`DonationRepository`].

use chrono::{DateTime, Utc};
use steward_core::error::{StewardError, StewardResult};
use steward_core::models::donation::{CreateDonation, Donation};
use steward_core::repository::{DonationRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, format_date, parse_date, parse_uuid};
use crate::error::DbError;

const ENTITY: &str = "donation";

#[derive(Debug, SurrealValue)]
struct DonationRow {
    member_id: Option<String>,
    donor_name: String,
    amount: i64,
    category: String,
    method: String,
    donated_on: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct DonationRowWithId {
    record_id: String,
    member_id: Option<String>,
    donor_name: String,
    amount: i64,
    category: String,
    method: String,
    donated_on: String,
    created_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_donation(self, id: Uuid) -> Result<Donation, DbError> {
        let member_id = self
            .member_id
            .as_deref()
            .map(|raw| parse_uuid(ENTITY, raw))
            .transpose()?;
        Ok(Donation {
            id,
            member_id,
            donor_name: self.donor_name,
            amount: self.amount,
            category: self.category,
            method: self.method,
            date: parse_date(ENTITY, &self.donated_on)?,
            created_at: self.created_at,
        })
    }
}

impl DonationRowWithId {
    fn try_into_donation(self) -> Result<Donation, DbError> {
        let id = parse_uuid(ENTITY, &self.record_id)?;
        DonationRow {
            member_id: self.member_id,
            donor_name: self.donor_name,
            amount: self.amount,
            category: self.category,
            method: self.method,
            donated_on: self.donated_on,
            created_at: self.created_at,
        }
        .into_donation(id)
    }
}

/// SurrealDB implementation of the Donation repository.
#[derive(Clone)]
pub struct SurrealDonationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDonationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DonationRepository for SurrealDonationRepository<C> {
    async fn create(&self, input: CreateDonation) -> StewardResult<Donation> {
        if input.amount <= 0 {
            return Err(StewardError::validation("amount", "amount must be positive"));
        }
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('donation', $id) SET \
                 member_id = $member_id, donor_name = $donor_name, \
                 amount = $amount, category = $category, \
                 method = $method, donated_on = $donated_on",
            )
            .bind(("id", id_str.clone()))
            .bind(("member_id", input.member_id.map(|m| m.to_string())))
            .bind(("donor_name", input.donor_name))
            .bind(("amount", input.amount))
            .bind(("category", input.category))
            .bind(("method", input.method))
            .bind(("donated_on", format_date(input.date)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DonationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_donation(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> StewardResult<Donation> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('donation', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_donation(id)?)
    }

    async fn list(&self, pagination: Pagination) -> StewardResult<PaginatedResult<Donation>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM donation GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM donation \
                 ORDER BY donated_on DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(DonationRowWithId::try_into_donation)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_member(&self, member_id: Uuid) -> StewardResult<Vec<Donation>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM donation \
                 WHERE member_id = $member_id \
                 ORDER BY donated_on DESC",
            )
            .bind(("member_id", member_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DonationRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(DonationRowWithId::try_into_donation)
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn delete(&self, id: Uuid) -> StewardResult<()> {
        self.db
            .query("DELETE type::record('donation', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
