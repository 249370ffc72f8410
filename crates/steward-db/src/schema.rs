//! Schema definitions and migration runner for SurrealDB.
//!
//! Tables are SCHEMAFULL. UUIDs and calendar dates are stored as strings
//! (`YYYY-MM-DD` sorts chronologically). Enums are stored as their
//! snake_case names with ASSERT constraints.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "events_and_donations",
        sql: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "user_profiles",
        sql: SCHEMA_V2,
    },
];

// -----------------------------------------------------------------------
// Schema v1: events and donations
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Events (one row per concrete, dated occurrence)
-- =======================================================================
DEFINE TABLE event SCHEMAFULL;
DEFINE FIELD title ON TABLE event TYPE string;
DEFINE FIELD description ON TABLE event TYPE string DEFAULT '';
DEFINE FIELD event_date ON TABLE event TYPE string;
DEFINE FIELD start_time ON TABLE event TYPE string;
DEFINE FIELD location ON TABLE event TYPE string;
DEFINE FIELD event_type ON TABLE event TYPE string \
    ASSERT $value IN ['worship', 'youth', 'special'];
DEFINE FIELD zoom_link ON TABLE event TYPE option<string>;
DEFINE FIELD attendees ON TABLE event TYPE int DEFAULT 0;
DEFINE FIELD created_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_event_date ON TABLE event COLUMNS event_date;

-- =======================================================================
-- Donations
-- =======================================================================
DEFINE TABLE donation SCHEMAFULL;
DEFINE FIELD member_id ON TABLE donation TYPE option<string>;
DEFINE FIELD donor_name ON TABLE donation TYPE string;
DEFINE FIELD amount ON TABLE donation TYPE int ASSERT $value > 0;
DEFINE FIELD category ON TABLE donation TYPE string;
DEFINE FIELD method ON TABLE donation TYPE string;
DEFINE FIELD donated_on ON TABLE donation TYPE string;
DEFINE FIELD created_at ON TABLE donation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_donation_member ON TABLE donation COLUMNS member_id;
DEFINE INDEX idx_donation_date ON TABLE donation COLUMNS donated_on;
";

// -----------------------------------------------------------------------
// Schema v2: dashboard user profiles
// -----------------------------------------------------------------------

const SCHEMA_V2: &str = "\
DEFINE TABLE user_profile SCHEMAFULL;
DEFINE FIELD email ON TABLE user_profile TYPE string;
DEFINE FIELD display_name ON TABLE user_profile TYPE string;
DEFINE FIELD role ON TABLE user_profile TYPE string \
    ASSERT $value IN ['admin', 'events_manager', 'finance_manager', \
    'resource_manager', 'content_manager', 'member'];
DEFINE FIELD created_at ON TABLE user_profile TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user_profile TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_profile_email ON TABLE user_profile \
    COLUMNS email UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
