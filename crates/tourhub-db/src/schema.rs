//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

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
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1: initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD photo_url ON TABLE user TYPE option<string>;
DEFINE FIELD role ON TABLE user TYPE option<string> \
    ASSERT $value = NONE OR $value IN ['tourist', 'guide', 'admin'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
DEFINE INDEX idx_user_role ON TABLE user COLUMNS role;

-- =======================================================================
-- Packages
-- =======================================================================
DEFINE TABLE package SCHEMAFULL;
DEFINE FIELD package_type ON TABLE package TYPE string;
DEFINE FIELD title ON TABLE package TYPE string;
DEFINE FIELD price ON TABLE package TYPE float;
DEFINE FIELD thumbnail ON TABLE package TYPE string;
DEFINE FIELD description ON TABLE package TYPE string DEFAULT '';
DEFINE FIELD created_at ON TABLE package TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE package TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_package_type ON TABLE package COLUMNS package_type;

-- =======================================================================
-- Bookings (references package, tourist email and guide user)
-- =======================================================================
DEFINE TABLE booking SCHEMAFULL;
DEFINE FIELD package_id ON TABLE booking TYPE string;
DEFINE FIELD package_title ON TABLE booking TYPE string;
DEFINE FIELD price ON TABLE booking TYPE float;
DEFINE FIELD tourist_email ON TABLE booking TYPE string;
DEFINE FIELD tourist_name ON TABLE booking TYPE string;
DEFINE FIELD guide_id ON TABLE booking TYPE string;
DEFINE FIELD guide_name ON TABLE booking TYPE string;
DEFINE FIELD tour_date ON TABLE booking TYPE datetime;
DEFINE FIELD status ON TABLE booking TYPE string \
    ASSERT $value IN ['pending', 'accepted', 'rejected', 'completed'];
DEFINE FIELD created_at ON TABLE booking TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE booking TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_booking_package_tourist ON TABLE booking \
    COLUMNS package_id, tourist_email;
DEFINE INDEX idx_booking_guide ON TABLE booking COLUMNS guide_id;

-- =======================================================================
-- Wishlist join rows (no uniqueness on the pair)
-- =======================================================================
DEFINE TABLE wishlist SCHEMAFULL;
DEFINE FIELD package_id ON TABLE wishlist TYPE string;
DEFINE FIELD email ON TABLE wishlist TYPE string;
DEFINE FIELD created_at ON TABLE wishlist TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_wishlist_email ON TABLE wishlist COLUMNS email;
DEFINE INDEX idx_wishlist_package ON TABLE wishlist COLUMNS package_id;

-- =======================================================================
-- Reviews
-- =======================================================================
DEFINE TABLE review SCHEMAFULL;
DEFINE FIELD guide_id ON TABLE review TYPE string;
DEFINE FIELD author_email ON TABLE review TYPE string;
DEFINE FIELD author_name ON TABLE review TYPE string;
DEFINE FIELD rating ON TABLE review TYPE int \
    ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD comment ON TABLE review TYPE string DEFAULT '';
DEFINE FIELD created_at ON TABLE review TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_review_guide ON TABLE review COLUMNS guide_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Bring the schema up to date.
///
/// Versions already recorded in `_migration` are skipped, so calling
/// this on every start is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);
    debug!(current_version, "Current schema version");

    for migration in MIGRATIONS {
        if migration.version > current_version {
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

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
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

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_every_table() {
        for table in ["user", "package", "booking", "wishlist", "review"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table {table}"
            );
        }
    }

    #[test]
    fn wishlist_pair_is_not_unique() {
        let wishlist_ddl: Vec<&str> = SCHEMA_V1
            .lines()
            .filter(|l| l.contains("ON TABLE wishlist"))
            .collect();
        assert!(wishlist_ddl.iter().all(|l| !l.contains("UNIQUE")));
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
