//! AWS subnet records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::BriefAccount;
use super::reference::{BriefPrefix, BriefRegion};
use super::status::{AwsStatus, StatusView};
use super::vpc::BriefVpc;
use crate::error::ValidationErrors;
use crate::utils::patch::reject_null;
use crate::validation::{
    check_arn, check_max_length, check_resource_id, NAME_MAX_LENGTH, REQUIRED,
    SUBNET_ID_MAX_LENGTH, SUBNET_ID_PREFIX,
};

/// An AWS subnet.
///
/// `owner_account` is set independently of the parent VPC's owner; the two
/// may differ (shared VPCs).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subnet {
    pub id: i64,
    pub subnet_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: AwsStatus,
    pub vpc: i64,
    pub owner_account: i64,
    pub subnet_cidr: Option<i64>,
    pub subnet_ipv6_cidr: Option<i64>,
    pub region: Option<i64>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

impl Subnet {
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_resource_id(
            &mut errors,
            "subnet_id",
            &self.subnet_id,
            SUBNET_ID_PREFIX,
            SUBNET_ID_MAX_LENGTH,
        );
        check_max_length(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        check_arn(&mut errors, self.arn.as_deref());
        errors
    }

    pub fn prefix_ids(&self) -> impl Iterator<Item = i64> {
        self.subnet_cidr.into_iter().chain(self.subnet_ipv6_cidr)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubnetRequest {
    #[serde(default)]
    pub subnet_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub status: AwsStatus,
    #[serde(default)]
    pub vpc: Option<i64>,
    #[serde(default)]
    pub owner_account: Option<i64>,
    #[serde(default)]
    pub subnet_cidr: Option<i64>,
    #[serde(default)]
    pub subnet_ipv6_cidr: Option<i64>,
    #[serde(default)]
    pub region: Option<i64>,
    #[serde(default)]
    pub comments: String,
}

impl CreateSubnetRequest {
    /// Names of the required references the request leaves out.
    #[must_use]
    pub fn missing_references(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.vpc.is_none() {
            errors.add("vpc", REQUIRED);
        }
        if self.owner_account.is_none() {
            errors.add("owner_account", REQUIRED);
        }
        errors
    }

    /// Unsaved subnet. Missing references are left as 0; they are reported
    /// by `missing_references`.
    #[must_use]
    pub fn into_subnet(self, now: DateTime<Utc>) -> Subnet {
        Subnet {
            id: 0,
            subnet_id: self.subnet_id.trim().to_string(),
            name: self.name,
            arn: super::blank_to_none(self.arn),
            status: self.status,
            vpc: self.vpc.unwrap_or_default(),
            owner_account: self.owner_account.unwrap_or_default(),
            subnet_cidr: self.subnet_cidr,
            subnet_ipv6_cidr: self.subnet_ipv6_cidr,
            region: self.region,
            comments: self.comments,
            created: now,
            last_updated: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubnetRequest {
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub subnet_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub arn: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub status: Option<Option<AwsStatus>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub vpc: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub owner_account: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub subnet_cidr: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub subnet_ipv6_cidr: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub region: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub comments: Option<Option<String>>,
}

impl UpdateSubnetRequest {
    /// Fields sent as `null` that do not accept it.
    #[must_use]
    pub fn null_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "subnet_id", self.subnet_id.as_ref());
        reject_null(&mut errors, "name", self.name.as_ref());
        reject_null(&mut errors, "status", self.status.as_ref());
        reject_null(&mut errors, "vpc", self.vpc.as_ref());
        reject_null(&mut errors, "owner_account", self.owner_account.as_ref());
        reject_null(&mut errors, "comments", self.comments.as_ref());
        errors
    }

    pub fn apply_to(self, subnet: &mut Subnet) {
        if let Some(Some(subnet_id)) = self.subnet_id {
            subnet.subnet_id = subnet_id.trim().to_string();
        }
        if let Some(Some(name)) = self.name {
            subnet.name = name;
        }
        if let Some(arn) = self.arn {
            subnet.arn = super::blank_to_none(arn);
        }
        if let Some(Some(status)) = self.status {
            subnet.status = status;
        }
        if let Some(Some(vpc)) = self.vpc {
            subnet.vpc = vpc;
        }
        if let Some(Some(owner_account)) = self.owner_account {
            subnet.owner_account = owner_account;
        }
        if let Some(cidr) = self.subnet_cidr {
            subnet.subnet_cidr = cidr;
        }
        if let Some(cidr) = self.subnet_ipv6_cidr {
            subnet.subnet_ipv6_cidr = cidr;
        }
        if let Some(region) = self.region {
            subnet.region = region;
        }
        if let Some(Some(comments)) = self.comments {
            subnet.comments = comments;
        }
    }
}

/// PUT body. Missing references keep the stored ones, so callers report
/// `CreateSubnetRequest::missing_references` alongside.
impl From<CreateSubnetRequest> for UpdateSubnetRequest {
    fn from(req: CreateSubnetRequest) -> Self {
        Self {
            subnet_id: Some(Some(req.subnet_id)),
            name: Some(Some(req.name)),
            arn: Some(req.arn),
            status: Some(Some(req.status)),
            vpc: req.vpc.map(Some),
            owner_account: req.owner_account.map(Some),
            subnet_cidr: Some(req.subnet_cidr),
            subnet_ipv6_cidr: Some(req.subnet_ipv6_cidr),
            region: Some(req.region),
            comments: Some(Some(req.comments)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubnetFilter {
    pub status: Option<AwsStatus>,
    pub vpc_id: Option<i64>,
    pub owner_account_id: Option<i64>,
    pub region_id: Option<i64>,
    pub prefix_id: Option<i64>,
}

impl SubnetFilter {
    #[must_use]
    pub fn matches(&self, subnet: &Subnet) -> bool {
        self.status.is_none_or(|s| subnet.status == s)
            && self.vpc_id.is_none_or(|v| subnet.vpc == v)
            && self.owner_account_id.is_none_or(|a| subnet.owner_account == a)
            && self.region_id.is_none_or(|r| subnet.region == Some(r))
            && self.prefix_id.is_none_or(|p| subnet.prefix_ids().any(|id| id == p))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubnetView {
    pub id: i64,
    pub display: String,
    pub subnet_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: StatusView,
    pub vpc: BriefVpc,
    pub owner_account: BriefAccount,
    pub subnet_cidr: Option<BriefPrefix>,
    pub subnet_ipv6_cidr: Option<BriefPrefix>,
    pub region: Option<BriefRegion>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}
