//! `SeaORM` entity for the `aws_vpcs` table.
//!
//! The two CIDR sets live in `aws_vpc_secondary_ipv4_cidrs` and
//! `aws_vpc_ipv6_cidrs`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "aws_vpcs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub vpc_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: String,
    pub owner_account_id: i64,
    pub vpc_cidr_id: Option<i64>,
    pub region_id: Option<i64>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
