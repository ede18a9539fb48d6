use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::models::*;
use crate::services::MachineGroupService;

#[utoipa::path(
    post,
    path = "/machine-groups",
    tag = "machine-groups",
    request_body = CreateMachineGroupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = MachineGroupResponse),
        (status = 400, description = "缺少分组 ID 或机台列表", body = ErrorBody),
        (status = 409, description = "分组已存在", body = ErrorBody)
    )
)]
pub async fn create_machine_group(
    machine_group_service: web::Data<MachineGroupService>,
    request: web::Json<CreateMachineGroupRequest>,
) -> Result<HttpResponse> {
    match machine_group_service.create(request.into_inner()).await {
        Ok(group) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": group
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/machine-groups",
    tag = "machine-groups",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "机台分组列表", body = Vec<MachineGroupResponse>)
    )
)]
pub async fn list_machine_groups(
    machine_group_service: web::Data<MachineGroupService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match machine_group_service.list(&query.into_inner()).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": groups
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/machine-groups/{id}",
    tag = "machine-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    request_body = UpdateMachineGroupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = MachineGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn update_machine_group(
    machine_group_service: web::Data<MachineGroupService>,
    path: web::Path<String>,
    request: web::Json<UpdateMachineGroupRequest>,
) -> Result<HttpResponse> {
    match machine_group_service
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
    path = "/machine-groups/{id}/activate",
    tag = "machine-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = MachineGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn activate_machine_group(
    machine_group_service: web::Data<MachineGroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match machine_group_service
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
    path = "/machine-groups/{id}/deactivate",
    tag = "machine-groups",
    params(
        ("id" = String, Path, description = "分组 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = MachineGroupResponse),
        (status = 404, description = "分组不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_machine_group(
    machine_group_service: web::Data<MachineGroupService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match machine_group_service
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

pub fn machine_group_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/machine-groups")
            .route("", web::post().to(create_machine_group))
            .route("", web::get().to(list_machine_groups))
            .route("/{id}", web::put().to(update_machine_group))
            .route("/{id}/activate", web::post().to(activate_machine_group))
            .route("/{id}/deactivate", web::post().to(deactivate_machine_group)),
    );
}
