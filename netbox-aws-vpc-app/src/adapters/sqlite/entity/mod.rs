//! `SeaORM` entities, one module per table.

pub mod aws_account;
pub mod aws_subnet;
pub mod aws_vpc;
pub mod prefix;
pub mod region;
pub mod tenant;
pub mod vpc_ipv6_cidr;
pub mod vpc_secondary_ipv4_cidr;
