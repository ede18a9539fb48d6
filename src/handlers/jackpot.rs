use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::JackpotService;

#[utoipa::path(
    post,
    path = "/jackpots",
    tag = "jackpots",
    request_body = CreateJackpotRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = JackpotResponse),
        (status = 400, description = "请求参数错误", body = ErrorBody),
        (status = 409, description = "名称或 ID 已存在", body = ErrorBody)
    )
)]
pub async fn create_jackpot(
    jackpot_service: web::Data<JackpotService>,
    request: web::Json<CreateJackpotRequest>,
) -> Result<HttpResponse> {
    match jackpot_service.create(request.into_inner()).await {
        Ok(jackpot) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/jackpots",
    tag = "jackpots",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖池列表", body = Vec<JackpotResponse>)
    )
)]
pub async fn list_jackpots(
    jackpot_service: web::Data<JackpotService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match jackpot_service.list(query.active.unwrap_or(false)).await {
        Ok(jackpots) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpots
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/jackpots/count",
    tag = "jackpots",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖池总数", body = CountResponse)
    )
)]
pub async fn count_jackpots(jackpot_service: web::Data<JackpotService>) -> Result<HttpResponse> {
    match jackpot_service.count().await {
        Ok(count) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": count
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/jackpots/{id}",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "奖池详情", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn get_jackpot(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match jackpot_service.get(&path.into_inner()).await {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/jackpots/{id}",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    request_body = UpdateJackpotRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = JackpotResponse),
        (status = 400, description = "请求参数错误", body = ErrorBody),
        (status = 404, description = "奖池不存在", body = ErrorBody),
        (status = 409, description = "名称已存在", body = ErrorBody)
    )
)]
pub async fn update_jackpot(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
    request: web::Json<UpdateJackpotRequest>,
) -> Result<HttpResponse> {
    match jackpot_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/amount",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    request_body = SetAmountRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "金额已更新", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn set_amount(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
    request: web::Json<SetAmountRequest>,
) -> Result<HttpResponse> {
    match jackpot_service
        .set_amount(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/trigger",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    request_body = SetTriggerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "派奖阈值已更新", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn set_trigger(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
    request: web::Json<SetTriggerRequest>,
) -> Result<HttpResponse> {
    match jackpot_service
        .set_trigger(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/levels",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    request_body = SetLevelsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "允许的玩家等级已更新", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn set_levels(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
    request: web::Json<SetLevelsRequest>,
) -> Result<HttpResponse> {
    match jackpot_service
        .set_levels(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/activate",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已激活", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn activate_jackpot(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match jackpot_service.activate(&path.into_inner()).await {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/deactivate",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_jackpot(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match jackpot_service.deactivate(&path.into_inner()).await {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jackpots/{id}/reset",
    tag = "jackpots",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已重置：金额 0、未激活、贡献次数 0", body = JackpotResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn reset_jackpot(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match jackpot_service.reset(&path.into_inner()).await {
        Ok(jackpot) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpot
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn jackpot_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/jackpots")
            .route("", web::post().to(create_jackpot))
            .route("", web::get().to(list_jackpots))
            .route("/count", web::get().to(count_jackpots))
            .route("/{id}", web::get().to(get_jackpot))
            .route("/{id}", web::put().to(update_jackpot))
            .route("/{id}/amount", web::post().to(set_amount))
            .route("/{id}/trigger", web::post().to(set_trigger))
            .route("/{id}/levels", web::post().to(set_levels))
            .route("/{id}/activate", web::post().to(activate_jackpot))
            .route("/{id}/deactivate", web::post().to(deactivate_jackpot))
            .route("/{id}/reset", web::post().to(reset_jackpot)),
    );
}
