//! Records owned outside the AWS model and only referenced by it:
//! IP prefixes, tenants and regions.

use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// Address family of a prefix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AddressFamily {
    #[serde(rename = "4")]
    V4,
    #[serde(rename = "6")]
    V6,
}

impl AddressFamily {
    #[must_use]
    pub const fn of(net: &IpNet) -> Self {
        match net {
            IpNet::V4(_) => Self::V4,
            IpNet::V6(_) => Self::V6,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::V4 => "IPv4",
            Self::V6 => "IPv6",
        }
    }
}

/// An IP network range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prefix {
    pub id: i64,
    /// Network in CIDR notation, host bits cleared
    pub prefix: IpNet,
    #[serde(default)]
    pub description: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

impl Prefix {
    #[must_use]
    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.prefix)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.prefix.fmt(f)
    }
}

/// Ownership group an account can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

/// Geographic region a VPC or subnet lives in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(with = "crate::utils::datetime")]
    pub created: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrefixRequest {
    /// CIDR string, e.g. `10.0.0.0/16`
    pub prefix: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegionRequest {
    pub name: String,
    pub slug: String,
}

// ===== Nested representations =====

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BriefPrefix {
    pub id: i64,
    pub display: String,
    pub prefix: String,
    pub family: AddressFamily,
}

impl From<&Prefix> for BriefPrefix {
    fn from(prefix: &Prefix) -> Self {
        Self {
            id: prefix.id,
            display: prefix.to_string(),
            prefix: prefix.to_string(),
            family: prefix.family(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BriefTenant {
    pub id: i64,
    pub display: String,
    pub name: String,
    pub slug: String,
}

impl From<&Tenant> for BriefTenant {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            display: tenant.name.clone(),
            name: tenant.name.clone(),
            slug: tenant.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BriefRegion {
    pub id: i64,
    pub display: String,
    pub name: String,
    pub slug: String,
}

impl From<&Region> for BriefRegion {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id,
            display: region.name.clone(),
            name: region.name.clone(),
            slug: region.slug.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(cidr: &str) -> Prefix {
        Prefix {
            id: 1,
            prefix: cidr.parse().unwrap(),
            description: String::new(),
            created: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn prefix_displays_as_cidr() {
        assert_eq!(prefix("10.0.0.0/16").to_string(), "10.0.0.0/16");
        assert_eq!(prefix("2001:db8::/64").to_string(), "2001:db8::/64");
    }

    #[test]
    fn family_follows_network() {
        assert_eq!(prefix("10.0.0.0/16").family(), AddressFamily::V4);
        assert_eq!(prefix("2600:1f18:286d:f300::/56").family(), AddressFamily::V6);
    }

    #[test]
    fn brief_prefix_serializes_family_as_number_string() {
        let brief = BriefPrefix::from(&prefix("10.1.0.0/16"));
        let json = serde_json::to_value(&brief).unwrap();
        assert_eq!(json["prefix"], "10.1.0.0/16");
        assert_eq!(json["family"], "4");
    }
}
