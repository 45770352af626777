//! `/aws-vpc/vpcs/`, including the secondary IPv4 and IPv6 CIDR sets.

use actix_web::{web, HttpResponse};
use netbox_aws_vpc_app::AppState;
use netbox_aws_vpc_core::types::{
    BatchDeleteRequest, CidrSet, CreateVpcRequest, Page, PageRequest, UpdateVpcRequest, Vpc,
    VpcFilter, VpcView,
};

use super::PrefixLink;
use crate::error::ApiResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/vpcs")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(bulk_delete)),
    )
    .service(
        web::resource("/vpcs/{id}")
            .route(web::get().to(retrieve))
            .route(web::put().to(replace))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    )
    .service(
        web::resource("/vpcs/{id}/secondary-ipv4-cidrs")
            .app_data(web::Data::new(CidrSet::SecondaryIpv4))
            .route(web::post().to(add_cidr)),
    )
    .service(
        web::resource("/vpcs/{id}/secondary-ipv4-cidrs/{prefix_id}")
            .app_data(web::Data::new(CidrSet::SecondaryIpv4))
            .route(web::delete().to(remove_cidr)),
    )
    .service(
        web::resource("/vpcs/{id}/ipv6-cidrs")
            .app_data(web::Data::new(CidrSet::Ipv6))
            .route(web::post().to(add_cidr)),
    )
    .service(
        web::resource("/vpcs/{id}/ipv6-cidrs/{prefix_id}")
            .app_data(web::Data::new(CidrSet::Ipv6))
            .route(web::delete().to(remove_cidr)),
    );
}

async fn describe(state: &AppState, vpc: &Vpc) -> ApiResult<VpcView> {
    Ok(state.vpc_service.describe_vpc(vpc).await?)
}

async fn list(
    state: web::Data<AppState>,
    filter: web::Query<VpcFilter>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let vpcs = state.vpc_service.list_vpcs(&filter, *page).await?;
    let mut results = Vec::with_capacity(vpcs.results.len());
    for vpc in &vpcs.results {
        results.push(describe(&state, vpc).await?);
    }
    Ok(HttpResponse::Ok().json(Page {
        count: vpcs.count,
        results,
    }))
}

async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateVpcRequest>,
) -> ApiResult<HttpResponse> {
    let vpc = state.vpc_service.create_vpc(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(describe(&state, &vpc).await?))
}

async fn bulk_delete(
    state: web::Data<AppState>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    let result = state
        .vpc_service
        .batch_delete_vpcs(body.into_inner().ids)
        .await;
    HttpResponse::Ok().json(result)
}

async fn retrieve(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let vpc = state.vpc_service.get_vpc(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(describe(&state, &vpc).await?))
}

async fn replace(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CreateVpcRequest>,
) -> ApiResult<HttpResponse> {
    let vpc = state
        .vpc_service
        .replace_vpc(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &vpc).await?))
}

async fn partial_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UpdateVpcRequest>,
) -> ApiResult<HttpResponse> {
    let vpc = state
        .vpc_service
        .update_vpc(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &vpc).await?))
}

async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.vpc_service.delete_vpc(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn add_cidr(
    state: web::Data<AppState>,
    set: web::Data<CidrSet>,
    id: web::Path<i64>,
    body: web::Json<PrefixLink>,
) -> ApiResult<HttpResponse> {
    let vpc = state
        .vpc_service
        .add_cidr(id.into_inner(), **set, body.prefix)
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &vpc).await?))
}

async fn remove_cidr(
    state: web::Data<AppState>,
    set: web::Data<CidrSet>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (id, prefix_id) = path.into_inner();
    let vpc = state.vpc_service.remove_cidr(id, **set, prefix_id).await?;
    Ok(HttpResponse::Ok().json(describe(&state, &vpc).await?))
}
