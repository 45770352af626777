use sea_orm_migration::prelude::*;

use super::m20250421_000001_create_reference_tables::{Prefix, Region, Tenant};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // aws_accounts 表
        manager
            .create_table(
                Table::create()
                    .table(AwsAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwsAccount::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AwsAccount::AccountId).string().not_null())
                    .col(ColumnDef::new(AwsAccount::Arn).string().null())
                    .col(ColumnDef::new(AwsAccount::Name).string().not_null())
                    .col(ColumnDef::new(AwsAccount::Description).string().not_null())
                    .col(ColumnDef::new(AwsAccount::Status).string().not_null())
                    .col(ColumnDef::new(AwsAccount::TenantId).integer().null())
                    .col(ColumnDef::new(AwsAccount::Comments).string().not_null())
                    .col(ColumnDef::new(AwsAccount::Created).string().not_null())
                    .col(ColumnDef::new(AwsAccount::LastUpdated).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_accounts_tenant")
                            .from(AwsAccount::Table, AwsAccount::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aws_accounts_account_id")
                    .table(AwsAccount::Table)
                    .col(AwsAccount::AccountId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // aws_vpcs 表
        manager
            .create_table(
                Table::create()
                    .table(AwsVpc::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwsVpc::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AwsVpc::VpcId).string().not_null())
                    .col(ColumnDef::new(AwsVpc::Name).string().not_null())
                    .col(ColumnDef::new(AwsVpc::Arn).string().null())
                    .col(ColumnDef::new(AwsVpc::Status).string().not_null())
                    .col(ColumnDef::new(AwsVpc::OwnerAccountId).integer().not_null())
                    .col(ColumnDef::new(AwsVpc::VpcCidrId).integer().null())
                    .col(ColumnDef::new(AwsVpc::RegionId).integer().null())
                    .col(ColumnDef::new(AwsVpc::Comments).string().not_null())
                    .col(ColumnDef::new(AwsVpc::Created).string().not_null())
                    .col(ColumnDef::new(AwsVpc::LastUpdated).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_vpcs_owner_account")
                            .from(AwsVpc::Table, AwsVpc::OwnerAccountId)
                            .to(AwsAccount::Table, AwsAccount::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_vpcs_vpc_cidr")
                            .from(AwsVpc::Table, AwsVpc::VpcCidrId)
                            .to(Prefix::Table, Prefix::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_vpcs_region")
                            .from(AwsVpc::Table, AwsVpc::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aws_vpcs_vpc_id")
                    .table(AwsVpc::Table)
                    .col(AwsVpc::VpcId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aws_vpcs_owner_account_id")
                    .table(AwsVpc::Table)
                    .col(AwsVpc::OwnerAccountId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // VPC CIDR 关联表
        create_cidr_association(manager, VpcSecondaryIpv4Cidr::Table).await?;
        create_cidr_association(manager, VpcIpv6Cidr::Table).await?;

        // aws_subnets 表
        manager
            .create_table(
                Table::create()
                    .table(AwsSubnet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwsSubnet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AwsSubnet::SubnetId).string().not_null())
                    .col(ColumnDef::new(AwsSubnet::Name).string().not_null())
                    .col(ColumnDef::new(AwsSubnet::Arn).string().null())
                    .col(ColumnDef::new(AwsSubnet::Status).string().not_null())
                    .col(ColumnDef::new(AwsSubnet::VpcId).integer().not_null())
                    .col(ColumnDef::new(AwsSubnet::OwnerAccountId).integer().not_null())
                    .col(ColumnDef::new(AwsSubnet::SubnetCidrId).integer().null())
                    .col(ColumnDef::new(AwsSubnet::SubnetIpv6CidrId).integer().null())
                    .col(ColumnDef::new(AwsSubnet::RegionId).integer().null())
                    .col(ColumnDef::new(AwsSubnet::Comments).string().not_null())
                    .col(ColumnDef::new(AwsSubnet::Created).string().not_null())
                    .col(ColumnDef::new(AwsSubnet::LastUpdated).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_subnets_vpc")
                            .from(AwsSubnet::Table, AwsSubnet::VpcId)
                            .to(AwsVpc::Table, AwsVpc::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_subnets_owner_account")
                            .from(AwsSubnet::Table, AwsSubnet::OwnerAccountId)
                            .to(AwsAccount::Table, AwsAccount::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_subnets_subnet_cidr")
                            .from(AwsSubnet::Table, AwsSubnet::SubnetCidrId)
                            .to(Prefix::Table, Prefix::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_subnets_subnet_ipv6_cidr")
                            .from(AwsSubnet::Table, AwsSubnet::SubnetIpv6CidrId)
                            .to(Prefix::Table, Prefix::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_aws_subnets_region")
                            .from(AwsSubnet::Table, AwsSubnet::RegionId)
                            .to(Region::Table, Region::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aws_subnets_subnet_id")
                    .table(AwsSubnet::Table)
                    .col(AwsSubnet::SubnetId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aws_subnets_vpc_id")
                    .table(AwsSubnet::Table)
                    .col(AwsSubnet::VpcId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AwsSubnet::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VpcIpv6Cidr::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VpcSecondaryIpv4Cidr::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AwsVpc::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AwsAccount::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// `(awsvpc_id, prefix_id)` rows; removed with their VPC, never with a prefix
/// that is still listed.
async fn create_cidr_association<T>(manager: &SchemaManager<'_>, table: T) -> Result<(), DbErr>
where
    T: IntoIden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(
                    ColumnDef::new(CidrAssociation::AwsvpcId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CidrAssociation::PrefixId)
                        .integer()
                        .not_null(),
                )
                .primary_key(
                    Index::create()
                        .col(CidrAssociation::AwsvpcId)
                        .col(CidrAssociation::PrefixId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(table, CidrAssociation::AwsvpcId)
                        .to(AwsVpc::Table, AwsVpc::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .from(table, CidrAssociation::PrefixId)
                        .to(Prefix::Table, Prefix::Id)
                        .on_delete(ForeignKeyAction::Restrict),
                )
                .to_owned(),
        )
        .await
}

#[derive(DeriveIden)]
enum AwsAccount {
    #[sea_orm(iden = "aws_accounts")]
    Table,
    Id,
    AccountId,
    Arn,
    Name,
    Description,
    Status,
    TenantId,
    Comments,
    Created,
    LastUpdated,
}

#[derive(DeriveIden)]
enum AwsVpc {
    #[sea_orm(iden = "aws_vpcs")]
    Table,
    Id,
    VpcId,
    Name,
    Arn,
    Status,
    OwnerAccountId,
    VpcCidrId,
    RegionId,
    Comments,
    Created,
    LastUpdated,
}

#[derive(Clone, Copy, DeriveIden)]
enum VpcSecondaryIpv4Cidr {
    #[sea_orm(iden = "aws_vpc_secondary_ipv4_cidrs")]
    Table,
}

#[derive(Clone, Copy, DeriveIden)]
enum VpcIpv6Cidr {
    #[sea_orm(iden = "aws_vpc_ipv6_cidrs")]
    Table,
}

#[derive(DeriveIden)]
enum CidrAssociation {
    AwsvpcId,
    PrefixId,
}

#[derive(DeriveIden)]
enum AwsSubnet {
    #[sea_orm(iden = "aws_subnets")]
    Table,
    Id,
    SubnetId,
    Name,
    Arn,
    Status,
    VpcId,
    OwnerAccountId,
    SubnetCidrId,
    SubnetIpv6CidrId,
    RegionId,
    Comments,
    Created,
    LastUpdated,
}
