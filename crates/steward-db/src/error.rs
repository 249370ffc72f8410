//! Database-specific error types and conversions.

use steward_core::error::StewardError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// A statement ran but the database rejected it (constraint, ASSERT).
    #[error("Query rejected: {0}")]
    Query(String),

    /// A stored row could not be mapped back to a domain value.
    #[error("Corrupt {entity} row: {message}")]
    Decode { entity: &'static str, message: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for StewardError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StewardError::NotFound { entity, id },
            other => StewardError::Database(other.to_string()),
        }
    }
}
