//! `/aws-vpc/accounts/`

use actix_web::{web, HttpResponse};
use netbox_aws_vpc_app::AppState;
use netbox_aws_vpc_core::types::{
    Account, AccountFilter, AccountView, BatchDeleteRequest, CreateAccountRequest, Page,
    PageRequest, UpdateAccountRequest,
};

use crate::error::ApiResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/accounts")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(bulk_delete)),
    )
    .service(
        web::resource("/accounts/{id}")
            .route(web::get().to(retrieve))
            .route(web::put().to(replace))
            .route(web::patch().to(partial_update))
            .route(web::delete().to(destroy)),
    );
}

async fn describe(state: &AppState, account: &Account) -> ApiResult<AccountView> {
    Ok(state.account_service.describe_account(account).await?)
}

async fn list(
    state: web::Data<AppState>,
    filter: web::Query<AccountFilter>,
    page: web::Query<PageRequest>,
) -> ApiResult<HttpResponse> {
    let accounts = state.account_service.list_accounts(&filter, *page).await?;
    let mut results = Vec::with_capacity(accounts.results.len());
    for account in &accounts.results {
        results.push(describe(&state, account).await?);
    }
    Ok(HttpResponse::Ok().json(Page {
        count: accounts.count,
        results,
    }))
}

async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let account = state.account_service.create_account(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(describe(&state, &account).await?))
}

async fn bulk_delete(
    state: web::Data<AppState>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    let result = state
        .account_service
        .batch_delete_accounts(body.into_inner().ids)
        .await;
    HttpResponse::Ok().json(result)
}

async fn retrieve(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    let account = state.account_service.get_account(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(describe(&state, &account).await?))
}

async fn replace(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CreateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let account = state
        .account_service
        .replace_account(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &account).await?))
}

async fn partial_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UpdateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let account = state
        .account_service
        .update_account(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(describe(&state, &account).await?))
}

async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult<HttpResponse> {
    state.account_service.delete_account(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
