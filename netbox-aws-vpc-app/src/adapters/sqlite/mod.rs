//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements every repository trait of the core
//! crate against one local `SQLite` database. Unique indexes and foreign keys
//! in the schema back the checks the services run before writing.

mod account_repo;
pub(crate) mod entity;
mod migration;
mod reference_repo;
mod subnet_repo;
mod vpc_repo;

use std::path::Path;

use chrono::{DateTime, Utc};
use netbox_aws_vpc_core::error::{CoreError, CoreResult, ValidationErrors};
use netbox_aws_vpc_core::types::AwsStatus;
use netbox_aws_vpc_core::utils::datetime;
use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based store shared by all repositories.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring the schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::info!("SQLite store ready at {}", db_path.display());
        Ok(store)
    }
}

/// Map a `SeaORM` error onto the core error model.
///
/// Constraint violations surface as the same errors the services raise for
/// them, so a write that races past a service check still fails cleanly.
pub(crate) fn db_error(action: &str, e: DbErr) -> CoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            // "UNIQUE constraint failed: aws_vpcs.vpc_id"
            let field = msg
                .rsplit('.')
                .next()
                .map_or("__all__", str::trim)
                .to_string();
            CoreError::Validation(ValidationErrors::single(
                field,
                "A record with this value already exists.",
            ))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            CoreError::Integrity(format!("Failed to {action}: {msg}"))
        }
        _ => CoreError::StorageError(format!("Failed to {action}: {e}")),
    }
}

pub(crate) fn parse_timestamp(field: &str, raw: &str) -> CoreResult<DateTime<Utc>> {
    datetime::parse(raw)
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field}: {e}")))
}

pub(crate) fn parse_status(raw: &str) -> CoreResult<AwsStatus> {
    raw.parse()
        .map_err(|_| CoreError::SerializationError(format!("Invalid status: {raw}")))
}
