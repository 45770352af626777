//! 类型定义模块

mod account;
mod reference;
mod response;
mod status;
mod subnet;
mod vpc;

pub use account::{
    Account, AccountFilter, AccountView, BriefAccount, CreateAccountRequest, UpdateAccountRequest,
};
pub use reference::{
    AddressFamily, BriefPrefix, BriefRegion, BriefTenant, CreatePrefixRequest,
    CreateRegionRequest, CreateTenantRequest, Prefix, Region, Tenant,
};
pub use response::{
    BatchDeleteFailure, BatchDeleteRequest, BatchDeleteResult, Page, PageRequest,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use status::{AwsStatus, StatusView};
pub use subnet::{CreateSubnetRequest, Subnet, SubnetFilter, SubnetView, UpdateSubnetRequest};
pub use vpc::{BriefVpc, CidrSet, CreateVpcRequest, UpdateVpcRequest, Vpc, VpcFilter, VpcView};

/// Optional text fields store "nothing" as `None`, never as a blank string.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
