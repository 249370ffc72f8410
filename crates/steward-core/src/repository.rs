//! Repository trait definitions for the document store.
//!
//! All repository operations are async. Each call is an independent unit:
//! there is no transaction spanning several records.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StewardResult;
use crate::models::{
    donation::{CreateDonation, Donation},
    event::{Event, EventInstance, UpdateEvent},
    role::Role,
    user::{CreateUserProfile, UserProfile},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait EventRepository: Send + Sync {
    /// Persist one concrete event instance.
    fn create(&self, input: EventInstance) -> impl Future<Output = StewardResult<Event>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StewardResult<Event>> + Send;
    /// Newest first.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = StewardResult<PaginatedResult<Event>>> + Send;
    /// Events dated within `from..=to`, earliest first.
    fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = StewardResult<Vec<Event>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateEvent,
    ) -> impl Future<Output = StewardResult<Event>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = StewardResult<()>> + Send;
}

pub trait DonationRepository: Send + Sync {
    fn create(&self, input: CreateDonation)
    -> impl Future<Output = StewardResult<Donation>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StewardResult<Donation>> + Send;
    /// Newest first.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = StewardResult<PaginatedResult<Donation>>> + Send;
    /// A member's giving history, newest first.
    fn list_by_member(
        &self,
        member_id: Uuid,
    ) -> impl Future<Output = StewardResult<Vec<Donation>>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = StewardResult<()>> + Send;
}

pub trait UserProfileRepository: Send + Sync {
    fn create(
        &self,
        input: CreateUserProfile,
    ) -> impl Future<Output = StewardResult<UserProfile>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = StewardResult<UserProfile>> + Send;
    fn get_by_email(&self, email: &str)
    -> impl Future<Output = StewardResult<UserProfile>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = StewardResult<PaginatedResult<UserProfile>>> + Send;
    /// The only mutation of a user's role.
    fn set_role(
        &self,
        id: Uuid,
        role: Role,
    ) -> impl Future<Output = StewardResult<UserProfile>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = StewardResult<()>> + Send;
}
