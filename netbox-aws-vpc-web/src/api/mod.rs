//! REST API
//!
//! Plugin resources live under `/api/v1/aws-vpc/`; the records they point
//! at are served from the `ipam`, `tenancy` and `dcim` scopes.

mod accounts;
mod references;
mod root;
mod subnets;
mod vpcs;

use actix_web::web;
use serde::Deserialize;

pub const API_PREFIX: &str = "/api/v1";
pub const PLUGIN_SCOPE: &str = "/aws-vpc";

/// Mount every REST route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(
                web::scope(PLUGIN_SCOPE)
                    .configure(root::configure)
                    .configure(accounts::configure)
                    .configure(vpcs::configure)
                    .configure(subnets::configure),
            )
            .configure(references::configure),
    );
}

/// Body of the CIDR association endpoints.
#[derive(Debug, Deserialize)]
pub struct PrefixLink {
    pub prefix: i64,
}
