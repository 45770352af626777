//! Storage layer abstraction trait definition

mod account_repository;
mod reference_repository;
mod subnet_repository;
mod vpc_repository;

pub use account_repository::AccountRepository;
pub use reference_repository::{PrefixRepository, RegionRepository, TenantRepository};
pub use subnet_repository::SubnetRepository;
pub use vpc_repository::VpcRepository;
