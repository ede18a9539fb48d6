use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::models::*;
use crate::services::CasinoGroupService;

#[utoipa::path(
    post,
    path = "/casino-groups",
    tag = "casino-groups",
    request_body = CreateCasinoGroupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = CasinoGroupResponse),
        (status = 400, description = "缺少分组 ID 或赌场分组列表", body = ErrorBody),
        (status = 409, description = "分组已存在", body = ErrorBody)
    )
)]
pub async fn create_casino_group(
    casino_group_service: web::Data<CasinoGroupService>,
    request: web::Json<CreateCasinoGroupRequest>,
) -> Result<HttpResponse> {
    match casino_group_service.create(request.into_inner()).await {
        Ok(group) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": group
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/casino-groups",
    tag = "casino-groups",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "赌场分组列表", body = Vec<CasinoGroupResponse>)
    )
)]
pub async fn list_casino_groups(
    casino_group_service: web::Data<CasinoGroupService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match casino_group_service.list(&query.into_inner()).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": groups
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/casino-groups/{id}",
    tag = "casino-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    request_body = UpdateCasinoGroupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = CasinoGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn update_casino_group(
    casino_group_service: web::Data<CasinoGroupService>,
    path: web::Path<String>,
    request: web::Json<UpdateCasinoGroupRequest>,
) -> Result<HttpResponse> {
    match casino_group_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(group) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": group
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/casino-groups/{id}/activate",
    tag = "casino-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = CasinoGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn activate_casino_group(
    casino_group_service: web::Data<CasinoGroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match casino_group_service
        .set_status(&path.into_inner(), EntityStatus::Active)
        .await
    {
        Ok(group) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": group
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/casino-groups/{id}/deactivate",
    tag = "casino-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = CasinoGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_casino_group(
    casino_group_service: web::Data<CasinoGroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match casino_group_service
        .set_status(&path.into_inner(), EntityStatus::Inactive)
        .await
    {
        Ok(group) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": group
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn casino_group_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/casino-groups")
            .route("", web::post().to(create_casino_group))
            .route("", web::get().to(list_casino_groups))
            .route("/{id}", web::put().to(update_casino_group))
            .route("/{id}/activate", web::post().to(activate_casino_group))
            .route("/{id}/deactivate", web::post().to(deactivate_casino_group)),
    );
}
