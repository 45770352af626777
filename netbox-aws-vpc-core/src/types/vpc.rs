//! AWS VPC records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::BriefAccount;
use super::reference::{BriefPrefix, BriefRegion};
use super::status::{AwsStatus, StatusView};
use crate::error::ValidationErrors;
use crate::utils::patch::reject_null;
use crate::validation::{
    check_arn, check_max_length, check_resource_id, NAME_MAX_LENGTH, REQUIRED, VPC_ID_MAX_LENGTH,
    VPC_ID_PREFIX,
};

/// Which CIDR association set of a VPC an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CidrSet {
    SecondaryIpv4,
    Ipv6,
}

impl CidrSet {
    /// Field name of the set on the record.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::SecondaryIpv4 => "vpc_secondary_ipv4_cidrs",
            Self::Ipv6 => "vpc_ipv6_cidrs",
        }
    }
}

/// An AWS VPC.
///
/// The CIDR fields hold prefix primary keys. They reference prefixes, they
/// do not own them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vpc {
    pub id: i64,
    pub vpc_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: AwsStatus,
    pub owner_account: i64,
    pub vpc_cidr: Option<i64>,
    pub vpc_secondary_ipv4_cidrs: Vec<i64>,
    pub vpc_ipv6_cidrs: Vec<i64>,
    pub region: Option<i64>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

impl Vpc {
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check_resource_id(
            &mut errors,
            "vpc_id",
            &self.vpc_id,
            VPC_ID_PREFIX,
            VPC_ID_MAX_LENGTH,
        );
        check_max_length(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        check_arn(&mut errors, self.arn.as_deref());
        if let Some(primary) = self.vpc_cidr {
            if self.vpc_secondary_ipv4_cidrs.contains(&primary) {
                errors.add(
                    "vpc_secondary_ipv4_cidrs",
                    "The primary CIDR cannot also be a secondary CIDR.",
                );
            }
        }
        errors
    }

    /// Every prefix this VPC points at, primary first.
    pub fn prefix_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.vpc_cidr
            .into_iter()
            .chain(self.vpc_secondary_ipv4_cidrs.iter().copied())
            .chain(self.vpc_ipv6_cidrs.iter().copied())
    }

    #[must_use]
    pub fn cidr_set(&self, set: CidrSet) -> &[i64] {
        match set {
            CidrSet::SecondaryIpv4 => &self.vpc_secondary_ipv4_cidrs,
            CidrSet::Ipv6 => &self.vpc_ipv6_cidrs,
        }
    }

    pub fn cidr_set_mut(&mut self, set: CidrSet) -> &mut Vec<i64> {
        match set {
            CidrSet::SecondaryIpv4 => &mut self.vpc_secondary_ipv4_cidrs,
            CidrSet::Ipv6 => &mut self.vpc_ipv6_cidrs,
        }
    }
}

/// Sort and drop duplicate ids, so a set never lists the same prefix twice.
fn normalize_set(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVpcRequest {
    #[serde(default)]
    pub vpc_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub status: AwsStatus,
    /// Required; `None` is reported as a validation error
    #[serde(default)]
    pub owner_account: Option<i64>,
    #[serde(default)]
    pub vpc_cidr: Option<i64>,
    #[serde(default)]
    pub vpc_secondary_ipv4_cidrs: Vec<i64>,
    #[serde(default)]
    pub vpc_ipv6_cidrs: Vec<i64>,
    #[serde(default)]
    pub region: Option<i64>,
    #[serde(default)]
    pub comments: String,
}

impl CreateVpcRequest {
    #[must_use]
    pub fn missing_references(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.owner_account.is_none() {
            errors.add("owner_account", REQUIRED);
        }
        errors
    }

    /// Unsaved VPC. A missing owner account is left as 0, so the other
    /// fields can still be checked; `missing_references` reports it.
    #[must_use]
    pub fn into_vpc(self, now: DateTime<Utc>) -> Vpc {
        Vpc {
            id: 0,
            vpc_id: self.vpc_id.trim().to_string(),
            name: self.name,
            arn: super::blank_to_none(self.arn),
            status: self.status,
            owner_account: self.owner_account.unwrap_or_default(),
            vpc_cidr: self.vpc_cidr,
            vpc_secondary_ipv4_cidrs: normalize_set(self.vpc_secondary_ipv4_cidrs),
            vpc_ipv6_cidrs: normalize_set(self.vpc_ipv6_cidrs),
            region: self.region,
            comments: self.comments,
            created: now,
            last_updated: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVpcRequest {
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub vpc_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub arn: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub status: Option<Option<AwsStatus>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub owner_account: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub vpc_cidr: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub vpc_secondary_ipv4_cidrs: Option<Option<Vec<i64>>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub vpc_ipv6_cidrs: Option<Option<Vec<i64>>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub region: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::utils::patch::nullable")]
    pub comments: Option<Option<String>>,
}

impl UpdateVpcRequest {
    /// Fields sent as `null` that do not accept it.
    #[must_use]
    pub fn null_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "vpc_id", self.vpc_id.as_ref());
        reject_null(&mut errors, "name", self.name.as_ref());
        reject_null(&mut errors, "status", self.status.as_ref());
        reject_null(&mut errors, "owner_account", self.owner_account.as_ref());
        reject_null(
            &mut errors,
            CidrSet::SecondaryIpv4.field(),
            self.vpc_secondary_ipv4_cidrs.as_ref(),
        );
        reject_null(&mut errors, CidrSet::Ipv6.field(), self.vpc_ipv6_cidrs.as_ref());
        reject_null(&mut errors, "comments", self.comments.as_ref());
        errors
    }

    pub fn apply_to(self, vpc: &mut Vpc) {
        if let Some(Some(vpc_id)) = self.vpc_id {
            vpc.vpc_id = vpc_id.trim().to_string();
        }
        if let Some(Some(name)) = self.name {
            vpc.name = name;
        }
        if let Some(arn) = self.arn {
            vpc.arn = super::blank_to_none(arn);
        }
        if let Some(Some(status)) = self.status {
            vpc.status = status;
        }
        if let Some(Some(owner_account)) = self.owner_account {
            vpc.owner_account = owner_account;
        }
        if let Some(vpc_cidr) = self.vpc_cidr {
            vpc.vpc_cidr = vpc_cidr;
        }
        if let Some(Some(ids)) = self.vpc_secondary_ipv4_cidrs {
            vpc.vpc_secondary_ipv4_cidrs = normalize_set(ids);
        }
        if let Some(Some(ids)) = self.vpc_ipv6_cidrs {
            vpc.vpc_ipv6_cidrs = normalize_set(ids);
        }
        if let Some(region) = self.region {
            vpc.region = region;
        }
        if let Some(Some(comments)) = self.comments {
            vpc.comments = comments;
        }
    }
}

/// PUT body. A missing owner keeps the stored one, so callers report
/// `CreateVpcRequest::missing_references` alongside.
impl From<CreateVpcRequest> for UpdateVpcRequest {
    fn from(req: CreateVpcRequest) -> Self {
        Self {
            vpc_id: Some(Some(req.vpc_id)),
            name: Some(Some(req.name)),
            arn: Some(req.arn),
            status: Some(Some(req.status)),
            owner_account: req.owner_account.map(Some),
            vpc_cidr: Some(req.vpc_cidr),
            vpc_secondary_ipv4_cidrs: Some(Some(req.vpc_secondary_ipv4_cidrs)),
            vpc_ipv6_cidrs: Some(Some(req.vpc_ipv6_cidrs)),
            region: Some(req.region),
            comments: Some(Some(req.comments)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpcFilter {
    pub status: Option<AwsStatus>,
    pub owner_account_id: Option<i64>,
    pub region_id: Option<i64>,
    /// Matches the primary CIDR and both association sets
    pub prefix_id: Option<i64>,
}

impl VpcFilter {
    #[must_use]
    pub fn matches(&self, vpc: &Vpc) -> bool {
        self.status.is_none_or(|s| vpc.status == s)
            && self.owner_account_id.is_none_or(|a| vpc.owner_account == a)
            && self.region_id.is_none_or(|r| vpc.region == Some(r))
            && self.prefix_id.is_none_or(|p| vpc.prefix_ids().any(|id| id == p))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BriefVpc {
    pub id: i64,
    pub display: String,
    pub vpc_id: String,
    pub name: String,
}

impl From<&Vpc> for BriefVpc {
    fn from(vpc: &Vpc) -> Self {
        Self {
            id: vpc.id,
            display: vpc.vpc_id.clone(),
            vpc_id: vpc.vpc_id.clone(),
            name: vpc.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VpcView {
    pub id: i64,
    pub display: String,
    pub vpc_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: StatusView,
    pub owner_account: BriefAccount,
    pub vpc_cidr: Option<BriefPrefix>,
    pub vpc_secondary_ipv4_cidrs: Vec<BriefPrefix>,
    pub vpc_ipv6_cidrs: Vec<BriefPrefix>,
    pub region: Option<BriefRegion>,
    pub comments: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}
