//! `SeaORM` entity for the `aws_subnets` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "aws_subnets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub subnet_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: String,
    /// Parent VPC primary key
    pub vpc_id: i64,
    pub owner_account_id: i64,
    pub subnet_cidr_id: Option<i64>,
    pub subnet_ipv6_cidr_id: Option<i64>,
    pub region_id: Option<i64>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
