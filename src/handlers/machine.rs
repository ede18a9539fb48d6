use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::models::*;
use crate::services::MachineService;

#[utoipa::path(
    post,
    path = "/machines",
    tag = "machines",
    request_body = CreateMachineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = MachineResponse),
        (status = 400, description = "缺少必填字段或安装日期格式错误", body = ErrorBody),
        (status = 409, description = "机台 ID 已存在", body = ErrorBody)
    )
)]
pub async fn create_machine(
    machine_service: web::Data<MachineService>,
    request: web::Json<CreateMachineRequest>,
) -> Result<HttpResponse> {
    match machine_service.create(request.into_inner()).await {
        Ok(machine) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": machine
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/machines",
    tag = "machines",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "机台列表", body = Vec<MachineResponse>)
    )
)]
pub async fn list_machines(
    machine_service: web::Data<MachineService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match machine_service.list(&query.into_inner()).await {
        Ok(machines) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": machines
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/machines/{id}",
    tag = "machines",
    params(
        ("id" = String, Path, description = "机台 ID")
    ),
    request_body = UpdateMachineRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = MachineResponse),
        (status = 404, description = "机台不存在", body = ErrorBody)
    )
)]
pub async fn update_machine(
    machine_service: web::Data<MachineService>,
    path: web::Path<String>,
    request: web::Json<UpdateMachineRequest>,
) -> Result<HttpResponse> {
    match machine_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(machine) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": machine
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/machines/{id}/activate",
    tag = "machines",
    params(
        ("id" = String, Path, description = "机台 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = MachineResponse),
        (status = 404, description = "机台不存在", body = ErrorBody)
    )
)]
pub async fn activate_machine(
    machine_service: web::Data<MachineService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match machine_service
        .set_status(&path.into_inner(), EntityStatus::Active)
        .await
    {
        Ok(machine) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": machine
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/machines/{id}/deactivate",
    tag = "machines",
    params(
        ("id" = String, Path, description = "机台 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = MachineResponse),
        (status = 404, description = "机台不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_machine(
    machine_service: web::Data<MachineService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match machine_service
        .set_status(&path.into_inner(), EntityStatus::Inactive)
        .await
    {
        Ok(machine) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": machine
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn machine_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/machines")
            .route("", web::post().to(create_machine))
            .route("", web::get().to(list_machines))
            .route("/{id}", web::put().to(update_machine))
            .route("/{id}/activate", web::post().to(activate_machine))
            .route("/{id}/deactivate", web::post().to(deactivate_machine)),
    );
}
