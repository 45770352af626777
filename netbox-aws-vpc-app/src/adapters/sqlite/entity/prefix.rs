//! `SeaORM` entity for the `prefixes` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prefixes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// CIDR notation, host bits cleared
    pub prefix: String,
    pub description: String,
    pub created: String,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
