//! GraphQL query surface (read only).
//!
//! Objects expose the same fields as the REST representation, with nested
//! brief objects for references. Single-object fields are nullable so a
//! missing id only fails that field.

use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject,
};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use chrono::{DateTime, Utc};
use netbox_aws_vpc_app::AppState;
use netbox_aws_vpc_core::error::CoreError;
use netbox_aws_vpc_core::types::{
    AccountFilter, AccountView, AddressFamily, BriefAccount, BriefPrefix, BriefRegion,
    BriefTenant, BriefVpc, StatusView, SubnetFilter, SubnetView, VpcFilter, VpcView,
};

pub const GRAPHQL_PATH: &str = "/graphql";

pub type AwsVpcSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Build the schema; resolvers read the shared `AppState` from its data.
pub fn build_schema(state: web::Data<AppState>) -> AwsVpcSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(state)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GRAPHQL_PATH)
            .route(web::post().to(graphql))
            .route(web::get().to(graphiql)),
    );
}

async fn graphql(schema: web::Data<AwsVpcSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

fn graphql_error(err: CoreError) -> async_graphql::Error {
    let code = match &err {
        CoreError::NotFound { .. } => "NotFound",
        CoreError::Validation(_) => "Validation",
        CoreError::Protected { .. } => "Protected",
        CoreError::Integrity(_) => "Integrity",
        CoreError::SerializationError(_) => "SerializationError",
        CoreError::StorageError(_) => "StorageError",
    };
    if !err.is_expected() {
        tracing::error!(error = %err, "graphql resolver failed");
    }
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}

/// `offset` / `limit` over a full list. Without `limit` every row past
/// `offset` is returned; negative values count as absent.
fn window<T>(items: Vec<T>, limit: Option<i32>, offset: Option<i32>) -> Vec<T> {
    let offset = offset.and_then(|v| usize::try_from(v).ok()).unwrap_or(0);
    let limit = limit.and_then(|v| usize::try_from(v).ok()).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ===== Object types =====

#[derive(SimpleObject)]
#[graphql(name = "AWSStatus")]
pub struct Status {
    pub value: String,
    pub label: String,
    pub color: String,
}

impl From<StatusView> for Status {
    fn from(view: StatusView) -> Self {
        Self {
            value: view.value.as_str().to_string(),
            label: view.label.to_string(),
            color: view.color.to_string(),
        }
    }
}

#[derive(SimpleObject)]
pub struct PrefixRef {
    pub id: i64,
    pub display: String,
    pub prefix: String,
    pub family: i32,
}

impl From<BriefPrefix> for PrefixRef {
    fn from(brief: BriefPrefix) -> Self {
        Self {
            id: brief.id,
            display: brief.display,
            prefix: brief.prefix,
            family: match brief.family {
                AddressFamily::V4 => 4,
                AddressFamily::V6 => 6,
            },
        }
    }
}

#[derive(SimpleObject)]
pub struct TenantRef {
    pub id: i64,
    pub display: String,
    pub name: String,
    pub slug: String,
}

impl From<BriefTenant> for TenantRef {
    fn from(brief: BriefTenant) -> Self {
        Self {
            id: brief.id,
            display: brief.display,
            name: brief.name,
            slug: brief.slug,
        }
    }
}

#[derive(SimpleObject)]
pub struct RegionRef {
    pub id: i64,
    pub display: String,
    pub name: String,
    pub slug: String,
}

impl From<BriefRegion> for RegionRef {
    fn from(brief: BriefRegion) -> Self {
        Self {
            id: brief.id,
            display: brief.display,
            name: brief.name,
            slug: brief.slug,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AWSAccountRef")]
pub struct AccountRef {
    pub id: i64,
    pub display: String,
    pub account_id: String,
    pub name: String,
}

impl From<BriefAccount> for AccountRef {
    fn from(brief: BriefAccount) -> Self {
        Self {
            id: brief.id,
            display: brief.display,
            account_id: brief.account_id,
            name: brief.name,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AWSVPCRef")]
pub struct VpcRef {
    pub id: i64,
    pub display: String,
    pub vpc_id: String,
    pub name: String,
}

impl From<BriefVpc> for VpcRef {
    fn from(brief: BriefVpc) -> Self {
        Self {
            id: brief.id,
            display: brief.display,
            vpc_id: brief.vpc_id,
            name: brief.name,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AWSAccountType")]
pub struct AwsAccount {
    pub id: i64,
    pub display: String,
    pub account_id: String,
    pub arn: Option<String>,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub tenant: Option<TenantRef>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

impl From<AccountView> for AwsAccount {
    fn from(view: AccountView) -> Self {
        Self {
            id: view.id,
            display: view.display,
            account_id: view.account_id,
            arn: view.arn,
            name: view.name,
            description: view.description,
            status: view.status.into(),
            tenant: view.tenant.map(Into::into),
            comments: view.comments,
            created: timestamp(&view.created),
            last_updated: timestamp(&view.last_updated),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AWSVPCType")]
pub struct AwsVpc {
    pub id: i64,
    pub display: String,
    pub vpc_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: Status,
    pub owner_account: AccountRef,
    pub vpc_cidr: Option<PrefixRef>,
    pub vpc_secondary_ipv4_cidrs: Vec<PrefixRef>,
    pub vpc_ipv6_cidrs: Vec<PrefixRef>,
    pub region: Option<RegionRef>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

impl From<VpcView> for AwsVpc {
    fn from(view: VpcView) -> Self {
        Self {
            id: view.id,
            display: view.display,
            vpc_id: view.vpc_id,
            name: view.name,
            arn: view.arn,
            status: view.status.into(),
            owner_account: view.owner_account.into(),
            vpc_cidr: view.vpc_cidr.map(Into::into),
            vpc_secondary_ipv4_cidrs: view
                .vpc_secondary_ipv4_cidrs
                .into_iter()
                .map(Into::into)
                .collect(),
            vpc_ipv6_cidrs: view.vpc_ipv6_cidrs.into_iter().map(Into::into).collect(),
            region: view.region.map(Into::into),
            comments: view.comments,
            created: timestamp(&view.created),
            last_updated: timestamp(&view.last_updated),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "AWSSubnetType")]
pub struct AwsSubnet {
    pub id: i64,
    pub display: String,
    pub subnet_id: String,
    pub name: String,
    pub arn: Option<String>,
    pub status: Status,
    pub vpc: VpcRef,
    pub owner_account: AccountRef,
    pub subnet_cidr: Option<PrefixRef>,
    pub subnet_ipv6_cidr: Option<PrefixRef>,
    pub region: Option<RegionRef>,
    pub comments: String,
    pub created: String,
    pub last_updated: String,
}

impl From<SubnetView> for AwsSubnet {
    fn from(view: SubnetView) -> Self {
        Self {
            id: view.id,
            display: view.display,
            subnet_id: view.subnet_id,
            name: view.name,
            arn: view.arn,
            status: view.status.into(),
            vpc: view.vpc.into(),
            owner_account: view.owner_account.into(),
            subnet_cidr: view.subnet_cidr.map(Into::into),
            subnet_ipv6_cidr: view.subnet_ipv6_cidr.map(Into::into),
            region: view.region.map(Into::into),
            comments: view.comments,
            created: timestamp(&view.created),
            last_updated: timestamp(&view.last_updated),
        }
    }
}

// ===== Query root =====

pub struct Query;

#[Object]
impl Query {
    async fn aws_account(
        &self,
        ctx: &Context<'_>,
        id: i64,
    ) -> async_graphql::Result<Option<AwsAccount>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let account = state
            .account_service
            .get_account(id)
            .await
            .map_err(graphql_error)?;
        let view = state
            .account_service
            .describe_account(&account)
            .await
            .map_err(graphql_error)?;
        Ok(Some(view.into()))
    }

    async fn aws_account_list(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> async_graphql::Result<Vec<AwsAccount>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let accounts = state
            .account_service
            .all_accounts(&AccountFilter::default())
            .await
            .map_err(graphql_error)?;
        let accounts = window(accounts, limit, offset);
        let mut results = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let view = state
                .account_service
                .describe_account(account)
                .await
                .map_err(graphql_error)?;
            results.push(view.into());
        }
        Ok(results)
    }

    async fn aws_vpc(
        &self,
        ctx: &Context<'_>,
        id: i64,
    ) -> async_graphql::Result<Option<AwsVpc>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let vpc = state.vpc_service.get_vpc(id).await.map_err(graphql_error)?;
        let view = state
            .vpc_service
            .describe_vpc(&vpc)
            .await
            .map_err(graphql_error)?;
        Ok(Some(view.into()))
    }

    async fn aws_vpc_list(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> async_graphql::Result<Vec<AwsVpc>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let vpcs = state
            .vpc_service
            .all_vpcs(&VpcFilter::default())
            .await
            .map_err(graphql_error)?;
        let vpcs = window(vpcs, limit, offset);
        let mut results = Vec::with_capacity(vpcs.len());
        for vpc in &vpcs {
            let view = state
                .vpc_service
                .describe_vpc(vpc)
                .await
                .map_err(graphql_error)?;
            results.push(view.into());
        }
        Ok(results)
    }

    async fn aws_subnet(
        &self,
        ctx: &Context<'_>,
        id: i64,
    ) -> async_graphql::Result<Option<AwsSubnet>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let subnet = state
            .subnet_service
            .get_subnet(id)
            .await
            .map_err(graphql_error)?;
        let view = state
            .subnet_service
            .describe_subnet(&subnet)
            .await
            .map_err(graphql_error)?;
        Ok(Some(view.into()))
    }

    async fn aws_subnet_list(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> async_graphql::Result<Vec<AwsSubnet>> {
        let state = ctx.data::<web::Data<AppState>>()?;
        let subnets = state
            .subnet_service
            .all_subnets(&SubnetFilter::default())
            .await
            .map_err(graphql_error)?;
        let subnets = window(subnets, limit, offset);
        let mut results = Vec::with_capacity(subnets.len());
        for subnet in &subnets {
            let view = state
                .subnet_service
                .describe_subnet(subnet)
                .await
                .map_err(graphql_error)?;
            results.push(view.into());
        }
        Ok(results)
    }
}
