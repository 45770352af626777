//! `SeaORM` entity for the `aws_vpc_secondary_ipv4_cidrs` association table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "aws_vpc_secondary_ipv4_cidrs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub awsvpc_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub prefix_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
