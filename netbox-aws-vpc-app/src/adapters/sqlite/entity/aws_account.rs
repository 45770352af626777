//! `SeaORM` entity for the `aws_accounts` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "aws_accounts")]
/// Database row model for an AWS account.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub account_id: String,
    pub arn: Option<String>,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tenant_id: Option<i64>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
