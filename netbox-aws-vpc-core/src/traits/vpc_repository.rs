//! VPC persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Vpc, VpcFilter};

/// VPC repository trait
///
/// A VPC is stored together with its two CIDR association sets. `insert`,
/// `update` and `delete` must apply the row and the sets atomically.
#[async_trait]
pub trait VpcRepository: Send + Sync {
    async fn find_all(&self, filter: &VpcFilter) -> CoreResult<Vec<Vpc>>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Vpc>>;

    async fn find_by_vpc_id(&self, vpc_id: &str) -> CoreResult<Option<Vpc>>;

    /// `vpc.id` is ignored; returns the stored record.
    async fn insert(&self, vpc: &Vpc) -> CoreResult<Vpc>;

    /// Replaces the row and both association sets.
    async fn update(&self, vpc: &Vpc) -> CoreResult<()>;

    /// Removes the row and its association rows, never the prefixes.
    async fn delete(&self, id: i64) -> CoreResult<()>;
}
