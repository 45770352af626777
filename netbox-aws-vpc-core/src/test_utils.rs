//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ReferenceService, ServiceContext};
use crate::traits::{
    AccountRepository, PrefixRepository, RegionRepository, SubnetRepository, TenantRepository,
    VpcRepository,
};
use crate::types::{
    Account, AccountFilter, CreateAccountRequest, CreatePrefixRequest, CreateRegionRequest,
    CreateSubnetRequest, CreateTenantRequest, CreateVpcRequest, Prefix, Region, Subnet,
    SubnetFilter, Tenant, Vpc, VpcFilter,
};

// ===== In-memory table =====

/// Rows keyed by primary key, ids handed out from 1 like an auto-increment column.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
    object: &'static str,
}

impl<T: Clone> Table<T> {
    fn new(object: &'static str) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            object,
        }
    }

    async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().await.values().find(|row| pred(row)).cloned()
    }

    async fn insert(&self, row: &T, set_id: impl FnOnce(&mut T, i64)) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = row.clone();
        set_id(&mut stored, id);
        self.rows.write().await.insert(id, stored.clone());
        stored
    }

    async fn replace(&self, id: i64, row: &T) -> CoreResult<()> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(self.object, id))?;
        *slot = row.clone();
        Ok(())
    }

    async fn remove(&self, id: i64) -> CoreResult<()> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found(self.object, id))
    }
}

// ===== MockAccountRepository =====

pub struct MockAccountRepository {
    table: Table<Account>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("AWS account"),
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_all(&self, filter: &AccountFilter) -> CoreResult<Vec<Account>> {
        let mut accounts = self.table.all().await;
        accounts.retain(|a| filter.matches(a));
        Ok(accounts)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Account>> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_account_id(&self, account_id: &str) -> CoreResult<Option<Account>> {
        Ok(self.table.find(|a| a.account_id == account_id).await)
    }

    async fn insert(&self, account: &Account) -> CoreResult<Account> {
        Ok(self.table.insert(account, |a, id| a.id = id).await)
    }

    async fn update(&self, account: &Account) -> CoreResult<()> {
        self.table.replace(account.id, account).await
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

// ===== MockVpcRepository =====

pub struct MockVpcRepository {
    table: Table<Vpc>,
}

impl MockVpcRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("AWS VPC"),
        }
    }
}

#[async_trait]
impl VpcRepository for MockVpcRepository {
    async fn find_all(&self, filter: &VpcFilter) -> CoreResult<Vec<Vpc>> {
        let mut vpcs = self.table.all().await;
        vpcs.retain(|v| filter.matches(v));
        Ok(vpcs)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Vpc>> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_vpc_id(&self, vpc_id: &str) -> CoreResult<Option<Vpc>> {
        Ok(self.table.find(|v| v.vpc_id == vpc_id).await)
    }

    async fn insert(&self, vpc: &Vpc) -> CoreResult<Vpc> {
        Ok(self.table.insert(vpc, |v, id| v.id = id).await)
    }

    async fn update(&self, vpc: &Vpc) -> CoreResult<()> {
        self.table.replace(vpc.id, vpc).await
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

// ===== MockSubnetRepository =====

pub struct MockSubnetRepository {
    table: Table<Subnet>,
}

impl MockSubnetRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("AWS subnet"),
        }
    }
}

#[async_trait]
impl SubnetRepository for MockSubnetRepository {
    async fn find_all(&self, filter: &SubnetFilter) -> CoreResult<Vec<Subnet>> {
        let mut subnets = self.table.all().await;
        subnets.retain(|s| filter.matches(s));
        Ok(subnets)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Subnet>> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_subnet_id(&self, subnet_id: &str) -> CoreResult<Option<Subnet>> {
        Ok(self.table.find(|s| s.subnet_id == subnet_id).await)
    }

    async fn insert(&self, subnet: &Subnet) -> CoreResult<Subnet> {
        Ok(self.table.insert(subnet, |s, id| s.id = id).await)
    }

    async fn update(&self, subnet: &Subnet) -> CoreResult<()> {
        self.table.replace(subnet.id, subnet).await
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

// ===== 引用记录 =====

pub struct MockPrefixRepository {
    table: Table<Prefix>,
}

impl MockPrefixRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("prefix"),
        }
    }
}

#[async_trait]
impl PrefixRepository for MockPrefixRepository {
    async fn find_all(&self) -> CoreResult<Vec<Prefix>> {
        Ok(self.table.all().await)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Prefix>> {
        Ok(self.table.get(id).await)
    }

    async fn insert(&self, prefix: &Prefix) -> CoreResult<Prefix> {
        Ok(self.table.insert(prefix, |p, id| p.id = id).await)
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

pub struct MockTenantRepository {
    table: Table<Tenant>,
}

impl MockTenantRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("tenant"),
        }
    }
}

#[async_trait]
impl TenantRepository for MockTenantRepository {
    async fn find_all(&self) -> CoreResult<Vec<Tenant>> {
        Ok(self.table.all().await)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Tenant>> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Tenant>> {
        Ok(self.table.find(|t| t.slug == slug).await)
    }

    async fn insert(&self, tenant: &Tenant) -> CoreResult<Tenant> {
        Ok(self.table.insert(tenant, |t, id| t.id = id).await)
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

pub struct MockRegionRepository {
    table: Table<Region>,
}

impl MockRegionRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new("region"),
        }
    }
}

#[async_trait]
impl RegionRepository for MockRegionRepository {
    async fn find_all(&self) -> CoreResult<Vec<Region>> {
        Ok(self.table.all().await)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Region>> {
        Ok(self.table.get(id).await)
    }

    async fn find_by_slug(&self, slug: &str) -> CoreResult<Option<Region>> {
        Ok(self.table.find(|r| r.slug == slug).await)
    }

    async fn insert(&self, region: &Region) -> CoreResult<Region> {
        Ok(self.table.insert(region, |r, id| r.id = id).await)
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.table.remove(id).await
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(MockAccountRepository::new()),
        Arc::new(MockVpcRepository::new()),
        Arc::new(MockSubnetRepository::new()),
        Arc::new(MockPrefixRepository::new()),
        Arc::new(MockTenantRepository::new()),
        Arc::new(MockRegionRepository::new()),
    ))
}

pub fn test_account_request(account_id: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        account_id: account_id.to_string(),
        name: "Test Account".to_string(),
        ..Default::default()
    }
}

pub fn test_vpc_request(vpc_id: &str, owner_account: i64) -> CreateVpcRequest {
    CreateVpcRequest {
        vpc_id: vpc_id.to_string(),
        name: "Test VPC".to_string(),
        owner_account: Some(owner_account),
        ..Default::default()
    }
}

pub fn test_subnet_request(subnet_id: &str, vpc: i64, owner_account: i64) -> CreateSubnetRequest {
    CreateSubnetRequest {
        subnet_id: subnet_id.to_string(),
        name: "Test Subnet".to_string(),
        vpc: Some(vpc),
        owner_account: Some(owner_account),
        ..Default::default()
    }
}

/// 直接写入仓库，绕过服务层校验
pub async fn seed_account(ctx: &ServiceContext, account_id: &str) -> Account {
    let account = test_account_request(account_id).into_account(Utc::now());
    ctx.account_repository().insert(&account).await.unwrap()
}

pub async fn seed_prefix(ctx: &Arc<ServiceContext>, cidr: &str) -> Prefix {
    ReferenceService::new(Arc::clone(ctx))
        .create_prefix(CreatePrefixRequest {
            prefix: cidr.to_string(),
            description: String::new(),
        })
        .await
        .unwrap()
}

pub async fn seed_tenant(ctx: &Arc<ServiceContext>, slug: &str) -> Tenant {
    ReferenceService::new(Arc::clone(ctx))
        .create_tenant(CreateTenantRequest {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_region(ctx: &Arc<ServiceContext>, slug: &str) -> Region {
    ReferenceService::new(Arc::clone(ctx))
        .create_region(CreateRegionRequest {
            name: slug.to_string(),
            slug: slug.to_string(),
        })
        .await
        .unwrap()
}
