//! Prefixes, tenants and regions.

use actix_web::{web, HttpResponse};
use netbox_aws_vpc_app::AppState;
use netbox_aws_vpc_core::types::{
    CreatePrefixRequest, CreateRegionRequest, CreateTenantRequest, PageRequest,
};

use crate::error::ApiResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ipam/prefixes")
            .route(web::get().to(list_prefixes))
            .route(web::post().to(create_prefix)),
    )
    .service(
        web::resource("/ipam/prefixes/{id}")
            .route(web::get().to(get_prefix))
            .route(web::delete().to(delete_prefix)),
    )
    .service(
        web::resource("/tenancy/tenants")
            .route(web::get().to(list_tenants))
            .route(web::post().to(create_tenant)),
    )
    .service(
        web::resource("/tenancy/tenants/{id}")
            .route(web::get().to(get_tenant))
            .route(web::delete().to(delete_tenant)),
    )
    .service(
        web::resource("/dcim/regions")
            .route(web::get().to(list_regions))
            .route(web::post().to(create_region)),
    )
    .service(
        web::resource("/dcim/regions/{id}")
            .route(web::get().to(get_region))
            .route(web::delete().to(delete_region)),
    );
}

// prefixes

async fn list_prefixes(
    state: web::Data<AppState>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let prefixes = state.reference_service.list_prefixes(*page).await?;
    Ok(HttpResponse::Ok().json(prefixes))
}

async fn create_prefix(
    state: web::Data<AppState>,
    body: web::Json<CreatePrefixRequest>,
) -> ApiResult<HttpResponse> {
    let prefix = state.reference_service.create_prefix(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(prefix))
}

async fn get_prefix(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let prefix = state.reference_service.get_prefix(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(prefix))
}

async fn delete_prefix(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.reference_service.delete_prefix(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// tenants

async fn list_tenants(
    state: web::Data<AppState>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let tenants = state.reference_service.list_tenants(*page).await?;
    Ok(HttpResponse::Ok().json(tenants))
}

async fn create_tenant(
    state: web::Data<AppState>,
    body: web::Json<CreateTenantRequest>,
) -> ApiResult<HttpResponse> {
    let tenant = state.reference_service.create_tenant(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(tenant))
}

async fn get_tenant(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let tenant = state.reference_service.get_tenant(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tenant))
}

async fn delete_tenant(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.reference_service.delete_tenant(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// regions

async fn list_regions(
    state: web::Data<AppState>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let regions = state.reference_service.list_regions(*page).await?;
    Ok(HttpResponse::Ok().json(regions))
}

async fn create_region(
    state: web::Data<AppState>,
    body: web::Json<CreateRegionRequest>,
) -> ApiResult<HttpResponse> {
    let region = state.reference_service.create_region(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(region))
}

async fn get_region(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let region = state.reference_service.get_region(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(region))
}

async fn delete_region(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.reference_service.delete_region(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
