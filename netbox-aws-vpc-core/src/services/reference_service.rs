//! Prefixes, tenants and regions
//!
//! These only exist so the AWS records have something to point at. Each can
//! be created, listed, fetched and deleted; deletes are refused while an
//! account, VPC or subnet still references the record.

use std::sync::Arc;

use chrono::Utc;
use ipnet::IpNet;

use super::{protect, ServiceContext};
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::types::{
    AccountFilter, CreatePrefixRequest, CreateRegionRequest, CreateTenantRequest, Page,
    PageRequest, Prefix, Region, SubnetFilter, Tenant, VpcFilter,
};
use crate::validation::{check_max_length, check_required, check_slug, DESCRIPTION_MAX_LENGTH};

/// Tenant and region names share the slug's limit.
const REFERENCE_NAME_MAX_LENGTH: usize = 100;

pub struct ReferenceService {
    ctx: Arc<ServiceContext>,
}

impl ReferenceService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== Prefixes =====

    pub async fn list_prefixes(&self, page: PageRequest) -> CoreResult<Page<Prefix>> {
        Ok(page.slice(self.ctx.prefix_repository().find_all().await?))
    }

    pub async fn get_prefix(&self, id: i64) -> CoreResult<Prefix> {
        self.ctx
            .prefix_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("prefix", id))
    }

    /// Host bits are cleared, so `10.0.0.1/16` is stored as `10.0.0.0/16`.
    pub async fn create_prefix(&self, request: CreatePrefixRequest) -> CoreResult<Prefix> {
        let mut errors = ValidationErrors::new();
        let network = parse_prefix(&mut errors, &request.prefix);
        check_max_length(
            &mut errors,
            "description",
            &request.description,
            DESCRIPTION_MAX_LENGTH,
        );
        errors.into_result()?;
        let Some(network) = network else {
            return Err(CoreError::Validation(ValidationErrors::single(
                "prefix",
                "This field is required.",
            )));
        };

        let now = Utc::now();
        let prefix = self
            .ctx
            .prefix_repository()
            .insert(&Prefix {
                id: 0,
                prefix: network,
                description: request.description,
                created: now,
                last_updated: now,
            })
            .await?;
        log::info!("Created prefix {prefix} (id {})", prefix.id);
        Ok(prefix)
    }

    pub async fn delete_prefix(&self, id: i64) -> CoreResult<()> {
        let prefix = self.get_prefix(id).await?;
        let dependents = self
            .ctx
            .dependents(
                Some(VpcFilter {
                    prefix_id: Some(id),
                    ..Default::default()
                }),
                Some(SubnetFilter {
                    prefix_id: Some(id),
                    ..Default::default()
                }),
            )
            .await?;
        protect("prefix", id, dependents)?;

        self.ctx.prefix_repository().delete(id).await?;
        log::info!("Deleted prefix {prefix} (id {id})");
        Ok(())
    }

    // ===== Tenants =====

    pub async fn list_tenants(&self, page: PageRequest) -> CoreResult<Page<Tenant>> {
        Ok(page.slice(self.ctx.tenant_repository().find_all().await?))
    }

    pub async fn get_tenant(&self, id: i64) -> CoreResult<Tenant> {
        self.ctx
            .tenant_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("tenant", id))
    }

    pub async fn create_tenant(&self, request: CreateTenantRequest) -> CoreResult<Tenant> {
        let mut errors = check_named(&request.name, &request.slug);
        if !errors.has("slug")
            && self
                .ctx
                .tenant_repository()
                .find_by_slug(&request.slug)
                .await?
                .is_some()
        {
            errors.add("slug", "Tenant with this slug already exists.");
        }
        errors.into_result()?;

        let now = Utc::now();
        let tenant = self
            .ctx
            .tenant_repository()
            .insert(&Tenant {
                id: 0,
                name: request.name.trim().to_string(),
                slug: request.slug,
                created: now,
                last_updated: now,
            })
            .await?;
        log::info!("Created tenant {} (id {})", tenant.slug, tenant.id);
        Ok(tenant)
    }

    pub async fn delete_tenant(&self, id: i64) -> CoreResult<()> {
        let tenant = self.get_tenant(id).await?;
        let dependents: Vec<String> = self
            .ctx
            .account_repository()
            .find_all(&AccountFilter {
                tenant_id: Some(id),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|account| format!("AWS account {}", account.account_id))
            .collect();
        protect("tenant", id, dependents)?;

        self.ctx.tenant_repository().delete(id).await?;
        log::info!("Deleted tenant {} (id {id})", tenant.slug);
        Ok(())
    }

    // ===== Regions =====

    pub async fn list_regions(&self, page: PageRequest) -> CoreResult<Page<Region>> {
        Ok(page.slice(self.ctx.region_repository().find_all().await?))
    }

    pub async fn get_region(&self, id: i64) -> CoreResult<Region> {
        self.ctx
            .region_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("region", id))
    }

    pub async fn create_region(&self, request: CreateRegionRequest) -> CoreResult<Region> {
        let mut errors = check_named(&request.name, &request.slug);
        if !errors.has("slug")
            && self
                .ctx
                .region_repository()
                .find_by_slug(&request.slug)
                .await?
                .is_some()
        {
            errors.add("slug", "Region with this slug already exists.");
        }
        errors.into_result()?;

        let now = Utc::now();
        let region = self
            .ctx
            .region_repository()
            .insert(&Region {
                id: 0,
                name: request.name.trim().to_string(),
                slug: request.slug,
                created: now,
                last_updated: now,
            })
            .await?;
        log::info!("Created region {} (id {})", region.slug, region.id);
        Ok(region)
    }

    pub async fn delete_region(&self, id: i64) -> CoreResult<()> {
        let region = self.get_region(id).await?;
        let dependents = self
            .ctx
            .dependents(
                Some(VpcFilter {
                    region_id: Some(id),
                    ..Default::default()
                }),
                Some(SubnetFilter {
                    region_id: Some(id),
                    ..Default::default()
                }),
            )
            .await?;
        protect("region", id, dependents)?;

        self.ctx.region_repository().delete(id).await?;
        log::info!("Deleted region {} (id {id})", region.slug);
        Ok(())
    }
}

fn parse_prefix(errors: &mut ValidationErrors, value: &str) -> Option<IpNet> {
    let value = value.trim();
    if value.is_empty() {
        errors.add("prefix", "This field may not be blank.");
        return None;
    }
    match value.parse::<IpNet>() {
        Ok(net) => Some(net.trunc()),
        Err(_) => {
            errors.add(
                "prefix",
                format!("{value} is not a valid IPv4 or IPv6 prefix in CIDR notation."),
            );
            None
        }
    }
}

fn check_named(name: &str, slug: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_required(&mut errors, "name", name);
    check_max_length(&mut errors, "name", name, REFERENCE_NAME_MAX_LENGTH);
    check_slug(&mut errors, slug);
    errors
}
