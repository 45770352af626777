use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // prefixes 表
        manager
            .create_table(
                Table::create()
                    .table(Prefix::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prefix::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prefix::Prefix).string().not_null())
                    .col(
                        ColumnDef::new(Prefix::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Prefix::Created).string().not_null())
                    .col(ColumnDef::new(Prefix::LastUpdated).string().not_null())
                    .to_owned(),
            )
            .await?;

        // tenants 表
        manager
            .create_table(
                Table::create()
                    .table(Tenant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tenant::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tenant::Name).string().not_null())
                    .col(ColumnDef::new(Tenant::Slug).string().not_null())
                    .col(ColumnDef::new(Tenant::Created).string().not_null())
                    .col(ColumnDef::new(Tenant::LastUpdated).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenants_slug")
                    .table(Tenant::Table)
                    .col(Tenant::Slug)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // regions 表
        manager
            .create_table(
                Table::create()
                    .table(Region::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Region::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Region::Name).string().not_null())
                    .col(ColumnDef::new(Region::Slug).string().not_null())
                    .col(ColumnDef::new(Region::Created).string().not_null())
                    .col(ColumnDef::new(Region::LastUpdated).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_regions_slug")
                    .table(Region::Table)
                    .col(Region::Slug)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Region::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tenant::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prefix::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(super) enum Prefix {
    #[sea_orm(iden = "prefixes")]
    Table,
    Id,
    Prefix,
    Description,
    Created,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(super) enum Tenant {
    #[sea_orm(iden = "tenants")]
    Table,
    Id,
    Name,
    Slug,
    Created,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(super) enum Region {
    #[sea_orm(iden = "regions")]
    Table,
    Id,
    Name,
    Slug,
    Created,
    LastUpdated,
}
