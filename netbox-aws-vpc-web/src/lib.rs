//! HTTP frontend for the AWS VPC inventory: REST CRUD under `/api/v1`,
//! a read-only GraphQL endpoint at `/graphql`.

pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod middleware;

use std::sync::Arc;

use actix_web::web;
use anyhow::Context;
use netbox_aws_vpc_app::adapters::SqliteStore;
use netbox_aws_vpc_app::{AppState, AppStateBuilder};

use crate::config::DatabaseSection;
use crate::error::{json_error_handler, path_error_handler, query_error_handler};

/// Open the database (running migrations) and build the shared state.
#[tracing::instrument(skip_all, fields(path = %database.path.display()))]
pub async fn build_state(database: &DatabaseSection) -> anyhow::Result<web::Data<AppState>> {
    let store = SqliteStore::new(&database.path)
        .await
        .with_context(|| format!("failed to open database {}", database.path.display()))?;
    let state = AppStateBuilder::new()
        .sqlite_store(Arc::new(store))
        .build()?;
    Ok(web::Data::new(state))
}

/// Routes and extractor settings. The caller registers `web::Data<AppState>`
/// and `web::Data<AwsVpcSchema>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(api::configure)
        .configure(graphql::configure);
}
