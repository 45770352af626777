//! AWS account service
//!
//! CRUD for accounts plus the tenant reference check, account-number
//! uniqueness and delete protection against owned VPCs and subnets.

use std::sync::Arc;

use chrono::Utc;

use super::{batch_delete, protect, ServiceContext};
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::types::{
    Account, AccountFilter, AccountView, BatchDeleteResult, BriefTenant, CreateAccountRequest,
    Page, PageRequest, SubnetFilter, UpdateAccountRequest, VpcFilter,
};

const OBJECT: &str = "AWS account";

pub struct AccountService {
    ctx: Arc<ServiceContext>,
}

impl AccountService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== CRUD operations =====

    pub async fn list_accounts(
        &self,
        filter: &AccountFilter,
        page: PageRequest,
    ) -> CoreResult<Page<Account>> {
        Ok(page.slice(self.all_accounts(filter).await?))
    }

    /// Every matching account, ordered by primary key.
    pub async fn all_accounts(&self, filter: &AccountFilter) -> CoreResult<Vec<Account>> {
        self.ctx.account_repository().find_all(filter).await
    }

    pub async fn get_account(&self, id: i64) -> CoreResult<Account> {
        self.ctx
            .account_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(OBJECT, id))
    }

    pub async fn create_account(&self, request: CreateAccountRequest) -> CoreResult<Account> {
        let candidate = request.into_account(Utc::now());
        self.check(&candidate, ValidationErrors::new()).await?;

        let account = self.ctx.account_repository().insert(&candidate).await?;
        log::info!("Created {OBJECT} {} (id {})", account.account_id, account.id);
        Ok(account)
    }

    /// Partial update; fields absent from `request` keep their values.
    pub async fn update_account(
        &self,
        id: i64,
        request: UpdateAccountRequest,
    ) -> CoreResult<Account> {
        let mut account = self.get_account(id).await?;
        let nulls = request.null_fields();
        request.apply_to(&mut account);
        account.last_updated = Utc::now();
        self.check(&account, nulls).await?;

        self.ctx.account_repository().update(&account).await?;
        log::info!("Updated {OBJECT} {} (id {id})", account.account_id);
        Ok(account)
    }

    /// Full update; every writable field takes the request's value.
    pub async fn replace_account(
        &self,
        id: i64,
        request: CreateAccountRequest,
    ) -> CoreResult<Account> {
        self.update_account(id, request.into()).await
    }

    /// Delete account
    ///
    /// Refused while any VPC or subnet names this account as its owner.
    pub async fn delete_account(&self, id: i64) -> CoreResult<()> {
        let account = self.get_account(id).await?;

        let dependents = self
            .ctx
            .dependents(
                Some(VpcFilter {
                    owner_account_id: Some(id),
                    ..Default::default()
                }),
                Some(SubnetFilter {
                    owner_account_id: Some(id),
                    ..Default::default()
                }),
            )
            .await?;
        protect(OBJECT, id, dependents)?;

        self.ctx.account_repository().delete(id).await?;
        log::info!("Deleted {OBJECT} {} (id {id})", account.account_id);
        Ok(())
    }

    pub async fn batch_delete_accounts(&self, ids: Vec<i64>) -> BatchDeleteResult {
        batch_delete(ids, move |id| self.delete_account(id)).await
    }

    /// Read representation with the tenant resolved.
    pub async fn describe_account(&self, account: &Account) -> CoreResult<AccountView> {
        let tenant = match account.tenant {
            Some(id) => Some(BriefTenant::from(&self.ctx.require_tenant(id).await?)),
            None => None,
        };

        Ok(AccountView {
            id: account.id,
            display: account.display(),
            account_id: account.account_id.clone(),
            arn: account.arn.clone(),
            name: account.name.clone(),
            description: account.description.clone(),
            status: account.status.into(),
            tenant,
            comments: account.comments.clone(),
            created: account.created,
            last_updated: account.last_updated,
        })
    }

    /// Field rules, tenant reference and account-number uniqueness, on top
    /// of whatever `errors` already holds.
    async fn check(&self, candidate: &Account, mut errors: ValidationErrors) -> CoreResult<()> {
        errors.merge(candidate.validate());

        if let Some(tenant) = candidate.tenant {
            self.ctx.check_tenant_ref(&mut errors, tenant).await?;
        }

        if !errors.has("account_id") {
            if let Some(existing) = self
                .ctx
                .account_repository()
                .find_by_account_id(&candidate.account_id)
                .await?
            {
                if existing.id != candidate.id {
                    errors.add(
                        "account_id",
                        "AWS account with this account ID already exists.",
                    );
                }
            }
        }

        errors.into_result()
    }
}
