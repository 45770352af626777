//! NetBox AWS VPC Core Library
//!
//! Record keeping for AWS accounts, VPCs and subnets, including:
//! - Account Service
//! - VPC Service (with secondary IPv4 / IPv6 CIDR association sets)
//! - Subnet Service
//! - Prefix, tenant and region records the AWS model points at
//!
//! Storage is abstracted behind the repository traits; the SQLite
//! implementation lives in `netbox-aws-vpc-app`.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ValidationErrors};
pub use services::ServiceContext;
pub use traits::{
    AccountRepository, PrefixRepository, RegionRepository, SubnetRepository, TenantRepository,
    VpcRepository,
};
