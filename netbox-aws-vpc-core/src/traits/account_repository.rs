//! Account persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Account, AccountFilter};

/// Account repository trait
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`), see `netbox-aws-vpc-app`
/// - `MockAccountRepository` for service unit tests
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Accounts matching `filter`, ordered by primary key
    async fn find_all(&self, filter: &AccountFilter) -> CoreResult<Vec<Account>>;

    /// Get account based on primary key
    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Account>>;

    /// Look up by the twelve-digit AWS account number
    async fn find_by_account_id(&self, account_id: &str) -> CoreResult<Option<Account>>;

    /// Insert a new account
    ///
    /// `account.id` is ignored; the stored record with its assigned key is returned.
    async fn insert(&self, account: &Account) -> CoreResult<Account>;

    /// Overwrite every field of an existing account
    ///
    /// Returns `CoreError::NotFound` if `account.id` does not exist.
    async fn update(&self, account: &Account) -> CoreResult<()>;

    /// Delete account
    ///
    /// Returns `CoreError::NotFound` if `id` does not exist.
    async fn delete(&self, id: i64) -> CoreResult<()>;
}
