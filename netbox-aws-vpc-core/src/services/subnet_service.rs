//! AWS subnet service

use std::sync::Arc;

use chrono::Utc;

use super::{batch_delete, ServiceContext};
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::types::{
    AddressFamily, BatchDeleteResult, BriefAccount, BriefPrefix, BriefRegion, BriefVpc,
    CreateSubnetRequest, Page, PageRequest, Subnet, SubnetFilter, SubnetView,
    UpdateSubnetRequest,
};

const OBJECT: &str = "AWS subnet";

pub struct SubnetService {
    ctx: Arc<ServiceContext>,
}

impl SubnetService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list_subnets(
        &self,
        filter: &SubnetFilter,
        page: PageRequest,
    ) -> CoreResult<Page<Subnet>> {
        Ok(page.slice(self.all_subnets(filter).await?))
    }

    pub async fn all_subnets(&self, filter: &SubnetFilter) -> CoreResult<Vec<Subnet>> {
        self.ctx.subnet_repository().find_all(filter).await
    }

    pub async fn get_subnet(&self, id: i64) -> CoreResult<Subnet> {
        self.ctx
            .subnet_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(OBJECT, id))
    }

    pub async fn create_subnet(&self, request: CreateSubnetRequest) -> CoreResult<Subnet> {
        let missing = request.missing_references();
        let candidate = request.into_subnet(Utc::now());
        self.check(&candidate, missing).await?;

        let subnet = self.ctx.subnet_repository().insert(&candidate).await?;
        log::info!("Created {OBJECT} {} (id {})", subnet.subnet_id, subnet.id);
        Ok(subnet)
    }

    pub async fn update_subnet(&self, id: i64, request: UpdateSubnetRequest) -> CoreResult<Subnet> {
        let mut subnet = self.get_subnet(id).await?;
        let nulls = request.null_fields();
        request.apply_to(&mut subnet);
        self.save(subnet, nulls).await
    }

    pub async fn replace_subnet(
        &self,
        id: i64,
        request: CreateSubnetRequest,
    ) -> CoreResult<Subnet> {
        let mut subnet = self.get_subnet(id).await?;
        let missing = request.missing_references();
        UpdateSubnetRequest::from(request).apply_to(&mut subnet);
        self.save(subnet, missing).await
    }

    /// Nothing references a subnet, so deletes are never protected.
    pub async fn delete_subnet(&self, id: i64) -> CoreResult<()> {
        let subnet = self.get_subnet(id).await?;
        self.ctx.subnet_repository().delete(id).await?;
        log::info!("Deleted {OBJECT} {} (id {id})", subnet.subnet_id);
        Ok(())
    }

    pub async fn batch_delete_subnets(&self, ids: Vec<i64>) -> BatchDeleteResult {
        batch_delete(ids, move |id| self.delete_subnet(id)).await
    }

    pub async fn describe_subnet(&self, subnet: &Subnet) -> CoreResult<SubnetView> {
        let vpc = self.ctx.require_vpc(subnet.vpc).await?;
        let owner = self.ctx.require_account(subnet.owner_account).await?;
        let subnet_cidr = match subnet.subnet_cidr {
            Some(id) => Some(BriefPrefix::from(&self.ctx.require_prefix(id).await?)),
            None => None,
        };
        let subnet_ipv6_cidr = match subnet.subnet_ipv6_cidr {
            Some(id) => Some(BriefPrefix::from(&self.ctx.require_prefix(id).await?)),
            None => None,
        };
        let region = match subnet.region {
            Some(id) => Some(BriefRegion::from(&self.ctx.require_region(id).await?)),
            None => None,
        };

        Ok(SubnetView {
            id: subnet.id,
            display: subnet.subnet_id.clone(),
            subnet_id: subnet.subnet_id.clone(),
            name: subnet.name.clone(),
            arn: subnet.arn.clone(),
            status: subnet.status.into(),
            vpc: BriefVpc::from(&vpc),
            owner_account: BriefAccount::from(&owner),
            subnet_cidr,
            subnet_ipv6_cidr,
            region,
            comments: subnet.comments.clone(),
            created: subnet.created,
            last_updated: subnet.last_updated,
        })
    }

    async fn save(&self, mut subnet: Subnet, errors: ValidationErrors) -> CoreResult<Subnet> {
        subnet.last_updated = Utc::now();
        self.check(&subnet, errors).await?;

        self.ctx.subnet_repository().update(&subnet).await?;
        log::info!("Updated {OBJECT} {} (id {})", subnet.subnet_id, subnet.id);
        Ok(subnet)
    }

    /// Adds field rules, references and `subnet_id` uniqueness to `errors`.
    /// A field already in `errors` skips its reference lookup.
    async fn check(&self, candidate: &Subnet, mut errors: ValidationErrors) -> CoreResult<()> {
        errors.merge(candidate.validate());

        if !errors.has("vpc") {
            self.ctx.check_vpc_ref(&mut errors, "vpc", candidate.vpc).await?;
        }
        if !errors.has("owner_account") {
            self.ctx
                .check_account_ref(&mut errors, "owner_account", candidate.owner_account)
                .await?;
        }
        if let Some(id) = candidate.subnet_cidr {
            self.ctx
                .check_prefix_ref(&mut errors, "subnet_cidr", id, AddressFamily::V4)
                .await?;
        }
        if let Some(id) = candidate.subnet_ipv6_cidr {
            self.ctx
                .check_prefix_ref(&mut errors, "subnet_ipv6_cidr", id, AddressFamily::V6)
                .await?;
        }
        if let Some(region) = candidate.region {
            self.ctx.check_region_ref(&mut errors, region).await?;
        }

        if !errors.has("subnet_id") {
            if let Some(existing) = self
                .ctx
                .subnet_repository()
                .find_by_subnet_id(&candidate.subnet_id)
                .await?
            {
                if existing.id != candidate.id {
                    errors.add("subnet_id", "AWS subnet with this subnet ID already exists.");
                }
            }
        }

        errors.into_result()
    }
}
