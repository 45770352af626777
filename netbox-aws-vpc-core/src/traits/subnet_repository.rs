//! Subnet persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Subnet, SubnetFilter};

/// Subnet repository trait
#[async_trait]
pub trait SubnetRepository: Send + Sync {
    async fn find_all(&self, filter: &SubnetFilter) -> CoreResult<Vec<Subnet>>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subnet>>;

    async fn find_by_subnet_id(&self, subnet_id: &str) -> CoreResult<Option<Subnet>>;

    /// `subnet.id` is ignored; returns the stored record.
    async fn insert(&self, subnet: &Subnet) -> CoreResult<Subnet>;

    async fn update(&self, subnet: &Subnet) -> CoreResult<()>;

    async fn delete(&self, id: i64) -> CoreResult<()>;
}
