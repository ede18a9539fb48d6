use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::models::*;
use crate::services::PlayerService;

#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = PlayerResponse),
        (status = 400, description = "缺少必填字段", body = ErrorBody),
        (status = 409, description = "玩家已存在", body = ErrorBody)
    )
)]
pub async fn create_player(
    player_service: web::Data<PlayerService>,
    request: web::Json<CreatePlayerRequest>,
) -> Result<HttpResponse> {
    match player_service.create(request.into_inner()).await {
        Ok(player) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": player
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "玩家列表", body = Vec<PlayerResponse>)
    )
)]
pub async fn list_players(
    player_service: web::Data<PlayerService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match player_service.list(&query.into_inner()).await {
        Ok(players) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": players
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/players/{id}",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    request_body = UpdatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = PlayerResponse),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn update_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
    request: web::Json<UpdatePlayerRequest>,
) -> Result<HttpResponse> {
    match player_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": player
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/players/{id}/activate",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = PlayerResponse),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn activate_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match player_service
        .set_status(&path.into_inner(), EntityStatus::Active)
        .await
    {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": player
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/players/{id}/deactivate",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = PlayerResponse),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match player_service
        .set_status(&path.into_inner(), EntityStatus::Inactive)
        .await
    {
        Ok(player) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": player
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/players/{id}",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已删除"),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn delete_player(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match player_service.delete(&path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Player deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/players/{id}/balance",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "玩家余额", body = BalanceResponse),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn get_balance(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match player_service.balance(&path.into_inner()).await {
        Ok(balance) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": balance
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/players/{id}/balance",
    tag = "players",
    params(
        ("id" = String, Path, description = "玩家 ID")
    ),
    request_body = SetBalanceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "余额已更新", body = BalanceResponse),
        (status = 400, description = "余额格式错误", body = ErrorBody),
        (status = 404, description = "玩家不存在", body = ErrorBody)
    )
)]
pub async fn set_balance(
    player_service: web::Data<PlayerService>,
    path: web::Path<String>,
    request: web::Json<SetBalanceRequest>,
) -> Result<HttpResponse> {
    match player_service
        .set_balance(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(balance) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": balance
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn player_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/players")
            .route("", web::post().to(create_player))
            .route("", web::get().to(list_players))
            .route("/{id}", web::put().to(update_player))
            .route("/{id}", web::delete().to(delete_player))
            .route("/{id}/activate", web::post().to(activate_player))
            .route("/{id}/deactivate", web::post().to(deactivate_player))
            .route("/{id}/balance", web::get().to(get_balance))
            .route("/{id}/balance", web::put().to(set_balance)),
    );
}
