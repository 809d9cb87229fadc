//! Database-specific error types and conversions.

use tourhub_core::error::TourError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated on {entity}")]
    Duplicate { entity: String },
}

impl DbError {
    /// Classify a failed statement, turning unique-index violations into
    /// [`DbError::Duplicate`].
    pub(crate) fn from_statement(entity: &str, err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::Duplicate {
                entity: entity.into(),
            }
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for TourError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TourError::NotFound { entity, id },
            DbError::Duplicate { entity } => TourError::AlreadyExists { entity },
            other => TourError::Database(other.to_string()),
        }
    }
}
