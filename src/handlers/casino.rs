use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::models::*;
use crate::services::CasinoService;

#[utoipa::path(
    post,
    path = "/casinos",
    tag = "casinos",
    request_body = CreateCasinoRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = CasinoResponse),
        (status = 400, description = "缺少必填字段", body = ErrorBody),
        (status = 409, description = "赌场编码已存在", body = ErrorBody)
    )
)]
pub async fn create_casino(
    casino_service: web::Data<CasinoService>,
    request: web::Json<CreateCasinoRequest>,
) -> Result<HttpResponse> {
    match casino_service.create(request.into_inner()).await {
        Ok(casino) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": casino
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/casinos",
    tag = "casinos",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "赌场列表", body = Vec<CasinoResponse>)
    )
)]
pub async fn list_casinos(
    casino_service: web::Data<CasinoService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match casino_service.list(&query.into_inner()).await {
        Ok(casinos) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": casinos
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/casinos/{id}",
    tag = "casinos",
    params(
        ("id" = String, Path, description = "赌场编码")
    ),
    request_body = UpdateCasinoRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = CasinoResponse),
        (status = 404, description = "赌场不存在", body = ErrorBody)
    )
)]
pub async fn update_casino(
    casino_service: web::Data<CasinoService>,
    path: web::Path<String>,
    request: web::Json<UpdateCasinoRequest>,
) -> Result<HttpResponse> {
    match casino_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(casino) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": casino
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/casinos/{id}/activate",
    tag = "casinos",
    params(
        ("id" = String, Path, description = "赌场编码")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = CasinoResponse),
        (status = 404, description = "赌场不存在", body = ErrorBody)
    )
)]
pub async fn activate_casino(
    casino_service: web::Data<CasinoService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match casino_service
        .set_status(&path.into_inner(), EntityStatus::Active)
        .await
    {
        Ok(casino) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": casino
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/casinos/{id}/deactivate",
    tag = "casinos",
    params(
        ("id" = String, Path, description = "赌场编码")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = CasinoResponse),
        (status = 404, description = "赌场不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_casino(
    casino_service: web::Data<CasinoService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match casino_service
        .set_status(&path.into_inner(), EntityStatus::Inactive)
        .await
    {
        Ok(casino) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": casino
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn casino_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/casinos")
            .route("", web::post().to(create_casino))
            .route("", web::get().to(list_casinos))
            .route("/{id}", web::put().to(update_casino))
            .route("/{id}/activate", web::post().to(activate_casino))
            .route("/{id}/deactivate", web::post().to(deactivate_casino)),
    );
}
