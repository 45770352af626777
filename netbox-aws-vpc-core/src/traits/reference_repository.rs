//! Persistence of the records the AWS model only points at

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Prefix, Region, Tenant};

#[async_trait]
pub trait PrefixRepository: Send + Sync {
    async fn find_all(&self) -> CoreResult<Vec<Prefix>>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Prefix>>;

    /// `prefix.id` is ignored; returns the stored record.
    async fn insert(&self, prefix: &Prefix) -> CoreResult<Prefix>;

    async fn delete(&self, id: i64) -> CoreResult<()>;
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_all(&self) -> CoreResult<Vec<Tenant>>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Tenant>>;

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Tenant>>;

    async fn insert(&self, tenant: &Tenant) -> CoreResult<Tenant>;

    async fn delete(&self, id: i64) -> CoreResult<()>;
}

#[async_trait]
pub trait RegionRepository: Send + Sync {
    async fn find_all(&self) -> CoreResult<Vec<Region>>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Region>>;

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Region>>;

    async fn insert(&self, region: &Region) -> CoreResult<Region>;

    async fn delete(&self, id: i64) -> CoreResult<()>;
}
