//! AWS VPC service
//!
//! Besides CRUD this owns the CIDR association sets: the secondary IPv4 set
//! and the IPv6 set can be grown and shrunk one prefix at a time without
//! touching the primary CIDR.

use std::sync::Arc;

use chrono::Utc;

use super::{batch_delete, protect, ServiceContext};
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::types::{
    AddressFamily, BatchDeleteResult, BriefAccount, BriefPrefix, BriefRegion, CidrSet,
    CreateVpcRequest, Page, PageRequest, SubnetFilter, UpdateVpcRequest, Vpc, VpcFilter, VpcView,
};

const OBJECT: &str = "AWS VPC";

pub struct VpcService {
    ctx: Arc<ServiceContext>,
}

impl VpcService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== CRUD operations =====

    pub async fn list_vpcs(&self, filter: &VpcFilter, page: PageRequest) -> CoreResult<Page<Vpc>> {
        Ok(page.slice(self.all_vpcs(filter).await?))
    }

    pub async fn all_vpcs(&self, filter: &VpcFilter) -> CoreResult<Vec<Vpc>> {
        self.ctx.vpc_repository().find_all(filter).await
    }

    pub async fn get_vpc(&self, id: i64) -> CoreResult<Vpc> {
        self.ctx
            .vpc_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(OBJECT, id))
    }

    pub async fn create_vpc(&self, request: CreateVpcRequest) -> CoreResult<Vpc> {
        let missing = request.missing_references();
        let candidate = request.into_vpc(Utc::now());
        self.check(&candidate, missing).await?;

        let vpc = self.ctx.vpc_repository().insert(&candidate).await?;
        log::info!("Created {OBJECT} {} (id {})", vpc.vpc_id, vpc.id);
        Ok(vpc)
    }

    pub async fn update_vpc(&self, id: i64, request: UpdateVpcRequest) -> CoreResult<Vpc> {
        let mut vpc = self.get_vpc(id).await?;
        let nulls = request.null_fields();
        request.apply_to(&mut vpc);
        self.save(vpc, nulls).await
    }

    pub async fn replace_vpc(&self, id: i64, request: CreateVpcRequest) -> CoreResult<Vpc> {
        let mut vpc = self.get_vpc(id).await?;
        let missing = request.missing_references();
        UpdateVpcRequest::from(request).apply_to(&mut vpc);
        self.save(vpc, missing).await
    }

    /// Delete VPC
    ///
    /// Refused while subnets belong to it. The referenced prefixes are left alone.
    pub async fn delete_vpc(&self, id: i64) -> CoreResult<()> {
        let vpc = self.get_vpc(id).await?;

        let dependents = self
            .ctx
            .dependents(
                None,
                Some(SubnetFilter {
                    vpc_id: Some(id),
                    ..Default::default()
                }),
            )
            .await?;
        protect(OBJECT, id, dependents)?;

        self.ctx.vpc_repository().delete(id).await?;
        log::info!("Deleted {OBJECT} {} (id {id})", vpc.vpc_id);
        Ok(())
    }

    pub async fn batch_delete_vpcs(&self, ids: Vec<i64>) -> BatchDeleteResult {
        batch_delete(ids, move |id| self.delete_vpc(id)).await
    }

    // ===== CIDR associations =====

    /// Associate `prefix_id` with one of the VPC's CIDR sets.
    ///
    /// Adding a prefix that is already in the set is a no-op.
    pub async fn add_cidr(&self, id: i64, set: CidrSet, prefix_id: i64) -> CoreResult<Vpc> {
        let mut vpc = self.get_vpc(id).await?;
        let members = vpc.cidr_set_mut(set);
        if members.contains(&prefix_id) {
            return Ok(vpc);
        }
        members.push(prefix_id);
        members.sort_unstable();
        self.save(vpc, ValidationErrors::new()).await
    }

    pub async fn remove_cidr(&self, id: i64, set: CidrSet, prefix_id: i64) -> CoreResult<Vpc> {
        let mut vpc = self.get_vpc(id).await?;
        let members = vpc.cidr_set_mut(set);
        let Some(pos) = members.iter().position(|&p| p == prefix_id) else {
            return Err(CoreError::not_found(
                &format!("{OBJECT} {} association", set.field()),
                prefix_id,
            ));
        };
        members.remove(pos);
        self.save(vpc, ValidationErrors::new()).await
    }

    pub async fn add_secondary_ipv4_cidr(&self, id: i64, prefix_id: i64) -> CoreResult<Vpc> {
        self.add_cidr(id, CidrSet::SecondaryIpv4, prefix_id).await
    }

    pub async fn remove_secondary_ipv4_cidr(&self, id: i64, prefix_id: i64) -> CoreResult<Vpc> {
        self.remove_cidr(id, CidrSet::SecondaryIpv4, prefix_id).await
    }

    pub async fn add_ipv6_cidr(&self, id: i64, prefix_id: i64) -> CoreResult<Vpc> {
        self.add_cidr(id, CidrSet::Ipv6, prefix_id).await
    }

    pub async fn remove_ipv6_cidr(&self, id: i64, prefix_id: i64) -> CoreResult<Vpc> {
        self.remove_cidr(id, CidrSet::Ipv6, prefix_id).await
    }

    // ===== Representation =====

    pub async fn describe_vpc(&self, vpc: &Vpc) -> CoreResult<VpcView> {
        let owner = self.ctx.require_account(vpc.owner_account).await?;
        let vpc_cidr = match vpc.vpc_cidr {
            Some(id) => Some(BriefPrefix::from(&self.ctx.require_prefix(id).await?)),
            None => None,
        };
        let vpc_secondary_ipv4_cidrs = self.brief_prefixes(&vpc.vpc_secondary_ipv4_cidrs).await?;
        let vpc_ipv6_cidrs = self.brief_prefixes(&vpc.vpc_ipv6_cidrs).await?;
        let region = match vpc.region {
            Some(id) => Some(BriefRegion::from(&self.ctx.require_region(id).await?)),
            None => None,
        };

        Ok(VpcView {
            id: vpc.id,
            display: vpc.vpc_id.clone(),
            vpc_id: vpc.vpc_id.clone(),
            name: vpc.name.clone(),
            arn: vpc.arn.clone(),
            status: vpc.status.into(),
            owner_account: BriefAccount::from(&owner),
            vpc_cidr,
            vpc_secondary_ipv4_cidrs,
            vpc_ipv6_cidrs,
            region,
            comments: vpc.comments.clone(),
            created: vpc.created,
            last_updated: vpc.last_updated,
        })
    }

    async fn brief_prefixes(&self, ids: &[i64]) -> CoreResult<Vec<BriefPrefix>> {
        let mut briefs = Vec::with_capacity(ids.len());
        for &id in ids {
            briefs.push(BriefPrefix::from(&self.ctx.require_prefix(id).await?));
        }
        Ok(briefs)
    }

    async fn save(&self, mut vpc: Vpc, errors: ValidationErrors) -> CoreResult<Vpc> {
        vpc.last_updated = Utc::now();
        self.check(&vpc, errors).await?;

        self.ctx.vpc_repository().update(&vpc).await?;
        log::info!("Updated {OBJECT} {} (id {})", vpc.vpc_id, vpc.id);
        Ok(vpc)
    }

    /// Adds field rules, every reference, prefix families and `vpc_id`
    /// uniqueness to `errors`. An owner already reported is not looked up.
    async fn check(&self, candidate: &Vpc, mut errors: ValidationErrors) -> CoreResult<()> {
        errors.merge(candidate.validate());

        if !errors.has("owner_account") {
            self.ctx
                .check_account_ref(&mut errors, "owner_account", candidate.owner_account)
                .await?;
        }
        if let Some(id) = candidate.vpc_cidr {
            self.ctx
                .check_prefix_ref(&mut errors, "vpc_cidr", id, AddressFamily::V4)
                .await?;
        }
        for &id in &candidate.vpc_secondary_ipv4_cidrs {
            self.ctx
                .check_prefix_ref(
                    &mut errors,
                    CidrSet::SecondaryIpv4.field(),
                    id,
                    AddressFamily::V4,
                )
                .await?;
        }
        for &id in &candidate.vpc_ipv6_cidrs {
            self.ctx
                .check_prefix_ref(&mut errors, CidrSet::Ipv6.field(), id, AddressFamily::V6)
                .await?;
        }
        if let Some(region) = candidate.region {
            self.ctx.check_region_ref(&mut errors, region).await?;
        }

        if !errors.has("vpc_id") {
            if let Some(existing) = self
                .ctx
                .vpc_repository()
                .find_by_vpc_id(&candidate.vpc_id)
                .await?
            {
                if existing.id != candidate.id {
                    errors.add("vpc_id", "AWS VPC with this VPC ID already exists.");
                }
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SubnetService;
    use crate::test_utils::{
        create_test_context, seed_account, seed_prefix, seed_region, test_subnet_request,
        test_vpc_request,
    };
    use crate::types::AwsStatus;

    #[tokio::test]
    async fn create_with_primary_cidr_reads_back_cidr_string() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let prefix = seed_prefix(&ctx, "10.0.0.0/16").await;
        let svc = VpcService::new(ctx);

        let mut req = test_vpc_request("vpc-1234567890abcdef0", account.id);
        req.vpc_cidr = Some(prefix.id);
        let vpc = svc.create_vpc(req).await.unwrap();
        assert_eq!(vpc.status, AwsStatus::Active);

        let fetched = svc.get_vpc(vpc.id).await.unwrap();
        assert_eq!(fetched.vpc_id, "vpc-1234567890abcdef0");
        let view = svc.describe_vpc(&fetched).await.unwrap();
        assert_eq!(view.vpc_cidr.unwrap().prefix, "10.0.0.0/16");
        assert_eq!(view.owner_account.account_id, "123456789012");
    }

    #[tokio::test]
    async fn missing_owner_account_creates_nothing() {
        let ctx = create_test_context();
        let svc = VpcService::new(Arc::clone(&ctx));

        let req = CreateVpcRequest {
            vpc_id: "idVPC".to_string(),
            ..Default::default()
        };
        let err = svc.create_vpc(req).await.unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.messages("owner_account"), ["This field is required."]);
        assert!(errors.has("vpc_id"));

        let unknown_owner = test_vpc_request("vpc-12345678", 42);
        let err = svc.create_vpc(unknown_owner).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.has("owner_account")));

        let page = svc
            .list_vpcs(&VpcFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn every_status_round_trips() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let svc = VpcService::new(ctx);

        for (i, status) in AwsStatus::ALL.into_iter().enumerate() {
            let mut req = test_vpc_request(&format!("vpc-{i:08x}"), account.id);
            req.status = status;
            let vpc = svc.create_vpc(req).await.unwrap();
            assert_eq!(svc.get_vpc(vpc.id).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn association_sets_grow_independently() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "111111115511").await;
        let primary = seed_prefix(&ctx, "10.2.0.0/16").await;
        let secondary = seed_prefix(&ctx, "10.3.0.0/16").await;
        let ipv6 = seed_prefix(&ctx, "2600:0000:286d:f300::/56").await;
        let svc = VpcService::new(ctx);

        let mut req = test_vpc_request("vpc-0b1eb59b119d8da06", account.id);
        req.vpc_cidr = Some(primary.id);
        let vpc = svc.create_vpc(req).await.unwrap();
        assert!(vpc.vpc_secondary_ipv4_cidrs.is_empty());
        assert!(vpc.vpc_ipv6_cidrs.is_empty());

        let vpc = svc.add_ipv6_cidr(vpc.id, ipv6.id).await.unwrap();
        assert_eq!(vpc.vpc_ipv6_cidrs.len(), 1);
        assert_eq!(vpc.vpc_secondary_ipv4_cidrs.len(), 0);

        let vpc = svc.add_secondary_ipv4_cidr(vpc.id, secondary.id).await.unwrap();
        assert_eq!(vpc.vpc_ipv6_cidrs.len(), 1);
        assert_eq!(vpc.vpc_secondary_ipv4_cidrs.len(), 1);
        assert_eq!(vpc.vpc_cidr, Some(primary.id));

        // idempotent
        let vpc = svc.add_ipv6_cidr(vpc.id, ipv6.id).await.unwrap();
        assert_eq!(vpc.vpc_ipv6_cidrs.len(), 1);

        let view = svc.describe_vpc(&vpc).await.unwrap();
        assert_eq!(view.vpc_cidr.unwrap().prefix, "10.2.0.0/16");
        assert_eq!(view.vpc_ipv6_cidrs[0].prefix, "2600:0:286d:f300::/56");
    }

    #[tokio::test]
    async fn wrong_family_is_rejected_per_set() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let v4 = seed_prefix(&ctx, "10.1.0.0/16").await;
        let v6 = seed_prefix(&ctx, "2600:1f18:286d:f300::/56").await;
        let svc = VpcService::new(ctx);

        let vpc = svc
            .create_vpc(test_vpc_request("vpc-12345679", account.id))
            .await
            .unwrap();

        let err = svc.add_ipv6_cidr(vpc.id, v4.id).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.has("vpc_ipv6_cidrs")));
        let err = svc.add_secondary_ipv4_cidr(vpc.id, v6.id).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.has("vpc_secondary_ipv4_cidrs")));

        let mut req = test_vpc_request("vpc-1234567a", account.id);
        req.vpc_cidr = Some(v6.id);
        let err = svc.create_vpc(req).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.has("vpc_cidr")));

        assert!(svc.get_vpc(vpc.id).await.unwrap().vpc_ipv6_cidrs.is_empty());
    }

    #[tokio::test]
    async fn primary_cidr_cannot_join_secondary_set() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let primary = seed_prefix(&ctx, "10.0.0.0/16").await;
        let svc = VpcService::new(ctx);

        let mut req = test_vpc_request("vpc-12345678", account.id);
        req.vpc_cidr = Some(primary.id);
        let vpc = svc.create_vpc(req).await.unwrap();

        let err = svc
            .add_secondary_ipv4_cidr(vpc.id, primary.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn remove_cidr() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let v6 = seed_prefix(&ctx, "2001:db8::/56").await;
        let svc = VpcService::new(ctx);

        let mut req = test_vpc_request("vpc-12345678", account.id);
        req.vpc_ipv6_cidrs = vec![v6.id];
        let vpc = svc.create_vpc(req).await.unwrap();

        let vpc = svc.remove_ipv6_cidr(vpc.id, v6.id).await.unwrap();
        assert!(vpc.vpc_ipv6_cidrs.is_empty());
        assert!(matches!(
            svc.remove_ipv6_cidr(vpc.id, v6.id).await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_vpc_id_is_rejected_on_update() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let svc = VpcService::new(ctx);

        svc.create_vpc(test_vpc_request("vpc-aaaaaaaa", account.id))
            .await
            .unwrap();
        let b = svc
            .create_vpc(test_vpc_request("vpc-bbbbbbbb", account.id))
            .await
            .unwrap();

        let err = svc
            .update_vpc(
                b.id,
                UpdateVpcRequest {
                    vpc_id: Some(Some("vpc-aaaaaaaa".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.has("vpc_id")));

        // renaming to its own id is fine
        svc.update_vpc(
            b.id,
            UpdateVpcRequest {
                vpc_id: Some(Some("vpc-bbbbbbbb".to_string())),
                name: Some(Some("Updated VPC".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn patch_null_owner_is_rejected() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let svc = VpcService::new(ctx);
        let vpc = svc
            .create_vpc(test_vpc_request("vpc-12345678", account.id))
            .await
            .unwrap();

        let patch: UpdateVpcRequest =
            serde_json::from_str(r#"{"owner_account": null, "status": null}"#).unwrap();
        let err = svc.update_vpc(vpc.id, patch).await.unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.messages("owner_account"), ["This field may not be null."]);
        assert!(errors.has("status"));
        assert_eq!(svc.get_vpc(vpc.id).await.unwrap(), vpc);

        // a null on a nullable reference is still a clear
        let patch: UpdateVpcRequest = serde_json::from_str(r#"{"region": null}"#).unwrap();
        assert_eq!(svc.update_vpc(vpc.id, patch).await.unwrap().region, None);
    }

    #[tokio::test]
    async fn replace_requires_owner() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let region = seed_region(&ctx, "us-east-1").await;
        let svc = VpcService::new(ctx);

        let mut req = test_vpc_request("vpc-12345678", account.id);
        req.region = Some(region.id);
        let vpc = svc.create_vpc(req).await.unwrap();

        let err = svc
            .replace_vpc(
                vpc.id,
                CreateVpcRequest {
                    vpc_id: "vpc-12345678".to_string(),
                    vpc_cidr: Some(77),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let CoreError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.has("owner_account"));
        assert!(errors.has("vpc_cidr"));

        assert!(matches!(
            svc.replace_vpc(vpc.id + 100, CreateVpcRequest::default()).await,
            Err(CoreError::NotFound { .. })
        ));

        let replaced = svc
            .replace_vpc(vpc.id, test_vpc_request("vpc-12345678", account.id))
            .await
            .unwrap();
        assert_eq!(replaced.region, None);
    }

    #[tokio::test]
    async fn delete_is_protected_by_subnets_and_keeps_prefixes() {
        let ctx = create_test_context();
        let account = seed_account(&ctx, "123456789012").await;
        let prefix = seed_prefix(&ctx, "10.0.0.0/16").await;
        let vpcs = VpcService::new(Arc::clone(&ctx));
        let subnets = SubnetService::new(Arc::clone(&ctx));

        let mut req = test_vpc_request("vpc-12345678", account.id);
        req.vpc_cidr = Some(prefix.id);
        let vpc = vpcs.create_vpc(req).await.unwrap();
        let subnet = subnets
            .create_subnet(test_subnet_request("subnet-abcdef1234567890", vpc.id, account.id))
            .await
            .unwrap();

        assert!(matches!(
            vpcs.delete_vpc(vpc.id).await,
            Err(CoreError::Protected { .. })
        ));

        subnets.delete_subnet(subnet.id).await.unwrap();
        vpcs.delete_vpc(vpc.id).await.unwrap();

        assert!(ctx.prefix_repository().find_by_id(prefix.id).await.unwrap().is_some());
        assert!(matches!(
            vpcs.get_vpc(vpc.id).await,
            Err(CoreError::NotFound { .. })
        ));
    }
}
