//! 业务逻辑服务层

mod account_service;
mod reference_service;
mod subnet_service;
mod vpc_service;

pub use account_service::AccountService;
pub use reference_service::ReferenceService;
pub use subnet_service::SubnetService;
pub use vpc_service::VpcService;

use std::sync::Arc;

use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::traits::{
    AccountRepository, PrefixRepository, RegionRepository, SubnetRepository, TenantRepository,
    VpcRepository,
};
use crate::types::{
    Account, AddressFamily, BatchDeleteFailure, BatchDeleteResult, Prefix, Region, SubnetFilter,
    Tenant, Vpc, VpcFilter,
};

/// Service context - holds all repositories
///
/// The platform layer builds this once and injects its storage implementation.
pub struct ServiceContext {
    account_repository: Arc<dyn AccountRepository>,
    vpc_repository: Arc<dyn VpcRepository>,
    subnet_repository: Arc<dyn SubnetRepository>,
    prefix_repository: Arc<dyn PrefixRepository>,
    tenant_repository: Arc<dyn TenantRepository>,
    region_repository: Arc<dyn RegionRepository>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        vpc_repository: Arc<dyn VpcRepository>,
        subnet_repository: Arc<dyn SubnetRepository>,
        prefix_repository: Arc<dyn PrefixRepository>,
        tenant_repository: Arc<dyn TenantRepository>,
        region_repository: Arc<dyn RegionRepository>,
    ) -> Self {
        Self {
            account_repository,
            vpc_repository,
            subnet_repository,
            prefix_repository,
            tenant_repository,
            region_repository,
        }
    }

    #[must_use]
    pub fn account_repository(&self) -> &Arc<dyn AccountRepository> {
        &self.account_repository
    }

    #[must_use]
    pub fn vpc_repository(&self) -> &Arc<dyn VpcRepository> {
        &self.vpc_repository
    }

    #[must_use]
    pub fn subnet_repository(&self) -> &Arc<dyn SubnetRepository> {
        &self.subnet_repository
    }

    #[must_use]
    pub fn prefix_repository(&self) -> &Arc<dyn PrefixRepository> {
        &self.prefix_repository
    }

    #[must_use]
    pub fn tenant_repository(&self) -> &Arc<dyn TenantRepository> {
        &self.tenant_repository
    }

    #[must_use]
    pub fn region_repository(&self) -> &Arc<dyn RegionRepository> {
        &self.region_repository
    }

    // ===== Reference checks used by the write paths =====

    pub(crate) async fn check_account_ref(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        id: i64,
    ) -> CoreResult<()> {
        if self.account_repository.find_by_id(id).await?.is_none() {
            errors.add(field, related_not_found(id));
        }
        Ok(())
    }

    pub(crate) async fn check_vpc_ref(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        id: i64,
    ) -> CoreResult<()> {
        if self.vpc_repository.find_by_id(id).await?.is_none() {
            errors.add(field, related_not_found(id));
        }
        Ok(())
    }

    /// The prefix must exist and belong to `family`.
    pub(crate) async fn check_prefix_ref(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        id: i64,
        family: AddressFamily,
    ) -> CoreResult<()> {
        match self.prefix_repository.find_by_id(id).await? {
            None => errors.add(field, related_not_found(id)),
            Some(prefix) if prefix.family() != family => errors.add(
                field,
                format!("{prefix} is not an {} prefix.", family.label()),
            ),
            Some(_) => {}
        }
        Ok(())
    }

    pub(crate) async fn check_tenant_ref(
        &self,
        errors: &mut ValidationErrors,
        id: i64,
    ) -> CoreResult<()> {
        if self.tenant_repository.find_by_id(id).await?.is_none() {
            errors.add("tenant", related_not_found(id));
        }
        Ok(())
    }

    pub(crate) async fn check_region_ref(
        &self,
        errors: &mut ValidationErrors,
        id: i64,
    ) -> CoreResult<()> {
        if self.region_repository.find_by_id(id).await?.is_none() {
            errors.add("region", related_not_found(id));
        }
        Ok(())
    }

    // ===== Reference resolution used by the read paths =====

    pub(crate) async fn require_account(&self, id: i64) -> CoreResult<Account> {
        self.account_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| dangling("AWS account", id))
    }

    pub(crate) async fn require_vpc(&self, id: i64) -> CoreResult<Vpc> {
        self.vpc_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| dangling("AWS VPC", id))
    }

    pub(crate) async fn require_prefix(&self, id: i64) -> CoreResult<Prefix> {
        self.prefix_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| dangling("prefix", id))
    }

    pub(crate) async fn require_tenant(&self, id: i64) -> CoreResult<Tenant> {
        self.tenant_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| dangling("tenant", id))
    }

    pub(crate) async fn require_region(&self, id: i64) -> CoreResult<Region> {
        self.region_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| dangling("region", id))
    }

    // ===== Delete protection =====

    /// Display names of the VPCs and subnets matching the filters.
    pub(crate) async fn dependents(
        &self,
        vpcs: Option<VpcFilter>,
        subnets: Option<SubnetFilter>,
    ) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        if let Some(filter) = vpcs {
            names.extend(
                self.vpc_repository
                    .find_all(&filter)
                    .await?
                    .into_iter()
                    .map(|vpc| format!("AWS VPC {}", vpc.vpc_id)),
            );
        }
        if let Some(filter) = subnets {
            names.extend(
                self.subnet_repository
                    .find_all(&filter)
                    .await?
                    .into_iter()
                    .map(|subnet| format!("AWS subnet {}", subnet.subnet_id)),
            );
        }
        Ok(names)
    }
}

fn related_not_found(id: i64) -> String {
    format!("Related object not found using the provided numeric ID: {id}")
}

/// A stored reference that points nowhere; the schema's foreign keys should
/// make this unreachable.
fn dangling(object: &str, id: i64) -> CoreError {
    CoreError::Integrity(format!("dangling reference to {object} {id}"))
}

/// Refuse a delete while anything still points at the record.
pub(crate) fn protect(object: &str, id: i64, dependents: Vec<String>) -> CoreResult<()> {
    if dependents.is_empty() {
        return Ok(());
    }
    log::warn!(
        "Refusing to delete {object} {id}: {} dependent objects",
        dependents.len()
    );
    Err(CoreError::Protected {
        object: object.to_string(),
        id,
        dependents,
    })
}

/// Run `delete` for every id, collecting failures instead of stopping.
pub(crate) async fn batch_delete<F, Fut>(ids: Vec<i64>, mut delete: F) -> BatchDeleteResult
where
    F: FnMut(i64) -> Fut,
    Fut: std::future::Future<Output = CoreResult<()>>,
{
    let mut success_count = 0;
    let mut failures = Vec::new();

    for id in ids {
        match delete(id).await {
            Ok(()) => success_count += 1,
            Err(e) => failures.push(BatchDeleteFailure {
                id,
                reason: e.to_string(),
            }),
        }
    }

    BatchDeleteResult {
        success_count,
        failed_count: failures.len(),
        failures,
    }
}
