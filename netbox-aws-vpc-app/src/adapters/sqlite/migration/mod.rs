//! `SeaORM` migrations for `SqliteStore`.

pub use sea_orm_migration::prelude::*;

mod m20250421_000001_create_reference_tables;
mod m20250421_000002_create_aws_tables;

/// Migration entrypoint used by `sea_orm_migration::MigratorTrait`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250421_000001_create_reference_tables::Migration),
            Box::new(m20250421_000002_create_aws_tables::Migration),
        ]
    }
}
