//! Prefix, tenant and region repositories for `SqliteStore`.

use async_trait::async_trait;
use ipnet::IpNet;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use netbox_aws_vpc_core::error::{CoreError, CoreResult};
use netbox_aws_vpc_core::traits::{PrefixRepository, RegionRepository, TenantRepository};
use netbox_aws_vpc_core::types::{Prefix, Region, Tenant};

use super::entity::{prefix, region, tenant};
use super::{db_error, parse_timestamp, SqliteStore};

impl prefix::Model {
    fn into_prefix(self) -> CoreResult<Prefix> {
        let network: IpNet = self
            .prefix
            .parse()
            .map_err(|e| CoreError::SerializationError(format!("Invalid prefix: {e}")))?;
        Ok(Prefix {
            id: self.id,
            prefix: network,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            description: self.description,
        })
    }
}

impl tenant::Model {
    fn into_tenant(self) -> CoreResult<Tenant> {
        Ok(Tenant {
            id: self.id,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            name: self.name,
            slug: self.slug,
        })
    }
}

impl region::Model {
    fn into_region(self) -> CoreResult<Region> {
        Ok(Region {
            id: self.id,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            name: self.name,
            slug: self.slug,
        })
    }
}

// ===== Prefixes =====

#[async_trait]
impl PrefixRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Prefix>> {
        prefix::Entity::find()
            .order_by_asc(prefix::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("query prefixes", e))?
            .into_iter()
            .map(prefix::Model::into_prefix)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Prefix>> {
        prefix::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query prefix", e))?
            .map(prefix::Model::into_prefix)
            .transpose()
    }

    async fn insert(&self, item: &Prefix) -> CoreResult<Prefix> {
        prefix::ActiveModel {
            id: NotSet,
            prefix: Set(item.prefix.to_string()),
            description: Set(item.description.clone()),
            created: Set(item.created.to_rfc3339()),
            last_updated: Set(item.last_updated.to_rfc3339()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("insert prefix", e))?
        .into_prefix()
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let result = prefix::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("delete prefix", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("prefix", id));
        }
        Ok(())
    }
}

// ===== Tenants =====

#[async_trait]
impl TenantRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Tenant>> {
        tenant::Entity::find()
            .order_by_asc(tenant::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("query tenants", e))?
            .into_iter()
            .map(tenant::Model::into_tenant)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Tenant>> {
        tenant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query tenant", e))?
            .map(tenant::Model::into_tenant)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Tenant>> {
        tenant::Entity::find()
            .filter(tenant::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| db_error("query tenant", e))?
            .map(tenant::Model::into_tenant)
            .transpose()
    }

    async fn insert(&self, item: &Tenant) -> CoreResult<Tenant> {
        tenant::ActiveModel {
            id: NotSet,
            name: Set(item.name.clone()),
            slug: Set(item.slug.clone()),
            created: Set(item.created.to_rfc3339()),
            last_updated: Set(item.last_updated.to_rfc3339()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("insert tenant", e))?
        .into_tenant()
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let result = tenant::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("delete tenant", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("tenant", id));
        }
        Ok(())
    }
}

// ===== Regions =====

#[async_trait]
impl RegionRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Region>> {
        region::Entity::find()
            .order_by_asc(region::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("query regions", e))?
            .into_iter()
            .map(region::Model::into_region)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Region>> {
        region::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query region", e))?
            .map(region::Model::into_region)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Region>> {
        region::Entity::find()
            .filter(region::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| db_error("query region", e))?
            .map(region::Model::into_region)
            .transpose()
    }

    async fn insert(&self, item: &Region) -> CoreResult<Region> {
        region::ActiveModel {
            id: NotSet,
            name: Set(item.name.clone()),
            slug: Set(item.slug.clone()),
            created: Set(item.created.to_rfc3339()),
            last_updated: Set(item.last_updated.to_rfc3339()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("insert region", e))?
        .into_region()
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let result = region::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("delete region", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("region", id));
        }
        Ok(())
    }
}
