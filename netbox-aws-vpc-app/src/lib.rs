//! Application bootstrap for the AWS VPC inventory.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Frontends build one `AppState` at startup and share it.

pub mod adapters;

use std::sync::Arc;

use netbox_aws_vpc_core::error::{CoreError, CoreResult, ValidationErrors};
use netbox_aws_vpc_core::services::{
    AccountService, ReferenceService, ServiceContext, SubnetService, VpcService,
};
use netbox_aws_vpc_core::traits::{
    AccountRepository, PrefixRepository, RegionRepository, SubnetRepository, TenantRepository,
    VpcRepository,
};

/// Application state.
///
/// Holds all services and the `ServiceContext` they share.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    pub account_service: AccountService,
    pub vpc_service: VpcService,
    pub subnet_service: SubnetService,
    /// Prefixes, tenants and regions
    pub reference_service: ReferenceService,
}

/// Builder for constructing `AppState` with storage adapters.
///
/// Every repository is required. `sqlite_store` fills all of them from one
/// `SqliteStore`.
#[derive(Default)]
pub struct AppStateBuilder {
    account_repository: Option<Arc<dyn AccountRepository>>,
    vpc_repository: Option<Arc<dyn VpcRepository>>,
    subnet_repository: Option<Arc<dyn SubnetRepository>>,
    prefix_repository: Option<Arc<dyn PrefixRepository>>,
    tenant_repository: Option<Arc<dyn TenantRepository>>,
    region_repository: Option<Arc<dyn RegionRepository>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn account_repository(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn vpc_repository(mut self, repo: Arc<dyn VpcRepository>) -> Self {
        self.vpc_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn subnet_repository(mut self, repo: Arc<dyn SubnetRepository>) -> Self {
        self.subnet_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn prefix_repository(mut self, repo: Arc<dyn PrefixRepository>) -> Self {
        self.prefix_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn tenant_repository(mut self, repo: Arc<dyn TenantRepository>) -> Self {
        self.tenant_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn region_repository(mut self, repo: Arc<dyn RegionRepository>) -> Self {
        self.region_repository = Some(repo);
        self
    }

    /// Use one `SqliteStore` for every repository.
    #[cfg(feature = "sqlite-store")]
    #[must_use]
    pub fn sqlite_store(self, store: Arc<adapters::SqliteStore>) -> Self {
        self.account_repository(store.clone())
            .vpc_repository(store.clone())
            .subnet_repository(store.clone())
            .prefix_repository(store.clone())
            .tenant_repository(store.clone())
            .region_repository(store)
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` naming every missing adapter.
    pub fn build(self) -> CoreResult<AppState> {
        let mut missing = ValidationErrors::new();
        for (name, present) in [
            ("account_repository", self.account_repository.is_some()),
            ("vpc_repository", self.vpc_repository.is_some()),
            ("subnet_repository", self.subnet_repository.is_some()),
            ("prefix_repository", self.prefix_repository.is_some()),
            ("tenant_repository", self.tenant_repository.is_some()),
            ("region_repository", self.region_repository.is_some()),
        ] {
            if !present {
                missing.add(name, format!("{name} is required"));
            }
        }

        let (
            Some(account_repository),
            Some(vpc_repository),
            Some(subnet_repository),
            Some(prefix_repository),
            Some(tenant_repository),
            Some(region_repository),
        ) = (
            self.account_repository,
            self.vpc_repository,
            self.subnet_repository,
            self.prefix_repository,
            self.tenant_repository,
            self.region_repository,
        )
        else {
            return Err(CoreError::Validation(missing));
        };

        let ctx = Arc::new(ServiceContext::new(
            account_repository,
            vpc_repository,
            subnet_repository,
            prefix_repository,
            tenant_repository,
            region_repository,
        ));

        Ok(AppState {
            account_service: AccountService::new(Arc::clone(&ctx)),
            vpc_service: VpcService::new(Arc::clone(&ctx)),
            subnet_service: SubnetService::new(Arc::clone(&ctx)),
            reference_service: ReferenceService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}
