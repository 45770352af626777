//! AWS account records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::BriefTenant;
use super::status::{AwsStatus, StatusView};
use crate::error::ValidationErrors;
use crate::utils::patch::reject_null;
use crate::validation::{
    check_account_id, check_arn, check_max_length, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH,
};

/// An AWS account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Primary key, assigned by the store
    pub id: i64,
    /// Twelve-digit AWS account number, unique
    pub account_id: String,
    pub arn: Option<String>,
    pub name: String,
    pub description: String,
    pub status: AwsStatus,
    /// Owning tenant
    pub tenant: Option<i64>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

impl Account {
    /// Field rules that need no store access.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_account_id(&mut errors, &self.account_id);
        check_arn(&mut errors, self.arn.as_deref());
        check_max_length(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        check_max_length(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MAX_LENGTH,
        );
        errors
    }

    #[must_use]
    pub fn display(&self) -> String {
        self.account_id.clone()
    }
}

/// Create account request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: AwsStatus,
    #[serde(default)]
    pub tenant: Option<i64>,
    #[serde(default)]
    pub comments: String,
}

impl CreateAccountRequest {
    /// Unsaved account built from the request (`id` is 0).
    #[must_use]
    pub fn into_account(self, now: DateTime<Utc>) -> Account {
        Account {
            id: 0,
            account_id: self.account_id.trim().to_string(),
            arn: super::blank_to_none(self.arn),
            name: self.name,
            description: self.description,
            status: self.status,
            tenant: self.tenant,
            comments: self.comments,
            created: now,
            last_updated: now,
        }
    }
}

/// Partial update of an account. Absent fields are left unchanged; only
/// `arn` and `tenant` accept `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub account_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub arn: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub status: Option<Option<AwsStatus>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub tenant: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub comments: Option<Option<String>>,
}

impl UpdateAccountRequest {
    /// Fields sent as `null` that do not accept it.
    #[must_use]
    pub fn null_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "account_id", self.account_id.as_ref());
        reject_null(&mut errors, "name", self.name.as_ref());
        reject_null(&mut errors, "description", self.description.as_ref());
        reject_null(&mut errors, "status", self.status.as_ref());
        reject_null(&mut errors, "comments", self.comments.as_ref());
        errors
    }

    pub fn apply_to(self, account: &mut Account) {
        if let Some(Some(account_id)) = self.account_id {
            account.account_id = account_id.trim().to_string();
        }
        if let Some(arn) = self.arn {
            account.arn = super::blank_to_none(arn);
        }
        if let Some(Some(name)) = self.name {
            account.name = name;
        }
        if let Some(Some(description)) = self.description {
            account.description = description;
        }
        if let Some(Some(status)) = self.status {
            account.status = status;
        }
        if let Some(tenant) = self.tenant {
            account.tenant = tenant;
        }
        if let Some(Some(comments)) = self.comments {
            account.comments = comments;
        }
    }
}

/// A full replacement (PUT) is a patch that sets every field.
impl From<CreateAccountRequest> for UpdateAccountRequest {
    fn from(req: CreateAccountRequest) -> Self {
        Self {
            account_id: Some(Some(req.account_id)),
            arn: Some(req.arn),
            name: Some(Some(req.name)),
            description: Some(Some(req.description)),
            status: Some(Some(req.status)),
            tenant: Some(req.tenant),
            comments: Some(Some(req.comments)),
        }
    }
}

/// List filter for accounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFilter {
    pub status: Option<AwsStatus>,
    pub tenant_id: Option<i64>,
}

impl AccountFilter {
    #[must_use]
    pub fn matches(&self, account: &Account) -> bool {
        self.status.is_none_or(|s| account.status == s)
            && self.tenant_id.is_none_or(|t| account.tenant == Some(t))
    }
}

/// Nested form used when another record points at an account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BriefAccount {
    pub id: i64,
    pub display: String,
    pub account_id: String,
    pub name: String,
}

impl From<&Account> for BriefAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            display: account.display(),
            account_id: account.account_id.clone(),
            name: account.name.clone(),
        }
    }
}

/// Read representation with references resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountView {
    pub id: i64,
    pub display: String,
    pub account_id: String,
    pub arn: Option<String>,
    pub name: String,
    pub description: String,
    pub status: StatusView,
    pub tenant: Option<BriefTenant>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        CreateAccountRequest {
            account_id: "123456789012".to_string(),
            name: "Test Account".to_string(),
            ..Default::default()
        }
        .into_account(Utc::now())
    }

    #[test]
    fn request_defaults_to_active() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"account_id": "123456789012", "name": "Test Account"}"#)
                .unwrap();
        assert_eq!(req.status, AwsStatus::Active);
        assert!(account().validate().is_empty());
    }

    #[test]
    fn blank_arn_is_stored_as_none() {
        let acc = CreateAccountRequest {
            account_id: "123456789012".to_string(),
            arn: Some("  ".to_string()),
            ..Default::default()
        }
        .into_account(Utc::now());
        assert_eq!(acc.arn, None);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut acc = account();
        acc.tenant = Some(4);
        let patch: UpdateAccountRequest =
            serde_json::from_str(r#"{"name": "Updated Account"}"#).unwrap();
        patch.apply_to(&mut acc);

        assert_eq!(acc.name, "Updated Account");
        assert_eq!(acc.account_id, "123456789012");
        assert_eq!(acc.tenant, Some(4));
        assert_eq!(acc.status, AwsStatus::Active);
    }

    #[test]
    fn patch_null_clears_tenant() {
        let mut acc = account();
        acc.tenant = Some(4);
        let patch: UpdateAccountRequest = serde_json::from_str(r#"{"tenant": null}"#).unwrap();
        patch.apply_to(&mut acc);
        assert_eq!(acc.tenant, None);
        assert!(UpdateAccountRequest::default().null_fields().is_empty());
    }

    #[test]
    fn patch_null_on_required_fields_is_reported() {
        let patch: UpdateAccountRequest =
            serde_json::from_str(r#"{"status": null, "account_id": null, "tenant": null}"#)
                .unwrap();
        let errors = patch.null_fields();
        assert!(errors.has("status"));
        assert!(errors.has("account_id"));
        assert!(!errors.has("tenant"));

        let mut acc = account();
        patch.apply_to(&mut acc);
        assert_eq!(acc.status, AwsStatus::Active);
        assert_eq!(acc.account_id, "123456789012");
    }

    #[test]
    fn validate_reports_every_field() {
        let mut acc = account();
        acc.account_id = "idVPC".to_string();
        acc.name = "x".repeat(300);
        let errors = acc.validate();
        assert!(errors.has("account_id"));
        assert!(errors.has("name"));
    }

    #[test]
    fn filter_matches() {
        let acc = account();
        assert!(AccountFilter::default().matches(&acc));
        let inactive = AccountFilter {
            status: Some(AwsStatus::Inactive),
            ..Default::default()
        };
        assert!(!inactive.matches(&acc));
        let tenant = AccountFilter {
            tenant_id: Some(1),
            ..Default::default()
        };
        assert!(!tenant.matches(&acc));
    }
}
