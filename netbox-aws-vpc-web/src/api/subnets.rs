//! `/aws-vpc/subnets/`

use actix_web::{web, HttpResponse};
use netbox_aws_vpc_app::AppState;
use netbox_aws_vpc_core::types::{
    BatchDeleteRequest, CreateSubnetRequest, Page, PageRequest, Subnet, SubnetFilter, SubnetView,
    UpdateSubnetRequest,
};

use crate::error::ApiResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/subnets")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(bulk_delete)),
    )
    .service(
        web::resource("/subnets/{id}")
            .route(web::get().to(retrieve))
            .route(web::put().to(replace))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    );
}

async fn describe(state: &AppState, subnet: &Subnet) -> ApiResult<SubnetView> {
    Ok(state.subnet_service.describe_subnet(subnet).await?)
}

async fn list(
    state: web::Data<AppState>,
    filter: web::Query<SubnetFilter>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let subnets = state.subnet_service.list_subnets(&filter, *page).await?;
    let mut results = Vec::with_capacity(subnets.results.len());
    for subnet in &subnets.results {
        results.push(describe(&state, subnet).await?);
    }
    Ok(HttpResponse::Ok().json(Page {
        count: subnets.count,
        results,
    }))
}

async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateSubnetRequest>,
) -> ApiResult<HttpResponse> {
    let subnet = state.subnet_service.create_subnet(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(describe(&state, &subnet).await?))
}

async fn bulk_delete(
    state: web::Data<AppState>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    let result = state
        .subnet_service
        .batch_delete_subnets(body.into_inner().ids)
        .await;
    HttpResponse::Ok().json(result)
}

async fn retrieve(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let subnet = state.subnet_service.get_subnet(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(describe(&state, &subnet).await?))
}

async fn replace(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CreateSubnetRequest>,
) -> ApiResult<HttpResponse> {
    let subnet = state
        .subnet_service
        .replace_subnet(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &subnet).await?))
}

async fn partial_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UpdateSubnetRequest>,
) -> ApiResult<HttpResponse> {
    let subnet = state
        .subnet_service
        .update_subnet(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &subnet).await?))
}

async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.subnet_service.delete_subnet(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
