//! `AccountRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use netbox_aws_vpc_core::error::{CoreError, CoreResult};
use netbox_aws_vpc_core::traits::AccountRepository;
use netbox_aws_vpc_core::types::{Account, AccountFilter};

use super::entity::aws_account;
use super::{db_error, parse_status, parse_timestamp, SqliteStore};

impl aws_account::Model {
    /// Convert a `SeaORM` row model into a domain `Account`.
    fn into_account(self) -> CoreResult<Account> {
        Ok(Account {
            id: self.id,
            status: parse_status(&self.status)?,
            created: parse_timestamp("created", &self.created)?,
            last_updated: parse_timestamp("last_updated", &self.last_updated)?,
            account_id: self.account_id,
            arn: self.arn,
            name: self.name,
            description: self.description,
            tenant: self.tenant_id,
            comments: self.comments,
        })
    }
}

/// Active model carrying every column; `id` is left unset for inserts.
fn account_to_active_model(account: &Account, with_id: bool) -> aws_account::ActiveModel {
    aws_account::ActiveModel {
        id: if with_id { Set(account.id) } else { NotSet },
        account_id: Set(account.account_id.clone()),
        arn: Set(account.arn.clone()),
        name: Set(account.name.clone()),
        description: Set(account.description.clone()),
        status: Set(account.status.as_str().to_string()),
        tenant_id: Set(account.tenant),
        comments: Set(account.comments.clone()),
        created: Set(account.created.to_rfc3339()),
        last_updated: Set(account.last_updated.to_rfc3339()),
    }
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn find_all(&self, filter: &AccountFilter) -> CoreResult<Vec<Account>> {
        let mut query = aws_account::Entity::find().order_by_asc(aws_account::Column::Id);
        if let Some(status) = filter.status {
            query = query.filter(aws_account::Column::Status.eq(status.as_str()));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(aws_account::Column::TenantId.eq(tenant_id));
        }

        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| db_error("query accounts", e))?;

        rows.into_iter()
            .map(aws_account::Model::into_account)
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Account>> {
        let row = aws_account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("query account", e))?;

        row.map(aws_account::Model::into_account).transpose()
    }

    async fn find_by_account_id(&self, account_id: &str) -> CoreResult<Option<Account>> {
        let row = aws_account::Entity::find()
            .filter(aws_account::Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("query account", e))?;

        row.map(aws_account::Model::into_account).transpose()
    }

    async fn insert(&self, account: &Account) -> CoreResult<Account> {
        let model = account_to_active_model(account, false)
            .insert(&self.db)
            .await
            .map_err(|e| db_error("insert account", e))?;

        model.into_account()
    }

    async fn update(&self, account: &Account) -> CoreResult<()> {
        account_to_active_model(account, true)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("AWS account", account.id),
                e => db_error("update account", e),
            })?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        let result = aws_account::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("delete account", e))?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("AWS account", id));
        }
        Ok(())
    }
}
