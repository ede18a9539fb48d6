use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::TransactionService;
use crate::utils::PageParams;

#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "交易已记录", body = TransactionResponse),
        (status = 400, description = "请求参数错误", body = ErrorBody)
    )
)]
pub async fn record_transaction(
    transaction_service: web::Data<TransactionService>,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    match transaction_service.record(request.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": transaction
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(PageParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "交易列表（按时间倒序）")
    )
)]
pub async fn list_transactions(
    transaction_service: web::Data<TransactionService>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse> {
    match transaction_service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = String, Path, description = "交易 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "交易详情", body = TransactionResponse),
        (status = 404, description = "交易不存在", body = ErrorBody)
    )
)]
pub async fn get_transaction(
    transaction_service: web::Data<TransactionService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match transaction_service.get(&path.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn transaction_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(record_transaction))
            .route("", web::get().to(list_transactions))
            .route("/{id}", web::get().to(get_transaction)),
    );
}
