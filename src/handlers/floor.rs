//! 机台侧接口（无需令牌）

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::events::EventHub;
use crate::models::*;
use crate::services::JackpotService;

#[utoipa::path(
    post,
    path = "/floor/spin/{name}",
    tag = "floor",
    params(
        ("name" = String, Path, description = "奖池名称 (URL 编码)")
    ),
    request_body = SpinRequest,
    responses(
        (status = 200, description = "spin 成功", body = SpinResponse),
        (status = 400, description = "请求参数错误", body = ErrorBody),
        (status = 403, description = "玩家等级不允许", body = ErrorBody),
        (status = 404, description = "奖池不存在", body = ErrorBody),
        (status = 429, description = "存储资源不足，请稍后重试", body = ErrorBody)
    )
)]
pub async fn spin(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
    request: web::Json<SpinRequest>,
) -> Result<HttpResponse> {
    let name = path.into_inner();

    match jackpot_service.spin(&name, request.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": result
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/floor/jackpots",
    tag = "floor",
    responses(
        (status = 200, description = "激活中的奖池", body = Vec<JackpotResponse>)
    )
)]
pub async fn active_jackpots(jackpot_service: web::Data<JackpotService>) -> Result<HttpResponse> {
    match jackpot_service.list(true).await {
        Ok(jackpots) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": jackpots
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/floor/jackpots/{id}/amount",
    tag = "floor",
    params(
        ("id" = String, Path, description = "奖池 ID")
    ),
    responses(
        (status = 200, description = "当前奖池金额", body = JackpotAmountResponse),
        (status = 404, description = "奖池不存在", body = ErrorBody)
    )
)]
pub async fn jackpot_amount(
    jackpot_service: web::Data<JackpotService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match jackpot_service.amount(&id).await {
        Ok(amount) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": amount
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// SSE: `event: jackpot-won`
#[utoipa::path(
    get,
    path = "/floor/events",
    tag = "floor",
    responses(
        (status = 200, description = "jackpot-won 事件流", content_type = "text/event-stream")
    )
)]
pub async fn events(hub: web::Data<EventHub>) -> HttpResponse {
    let stream = hub.sse_stream();
    log::info!(
        "SSE client connected ({} subscriber(s))",
        hub.subscriber_count()
    );

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .content_type("text/event-stream")
        .streaming(stream)
}

pub fn floor_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/floor")
            .route("/spin/{name}", web::post().to(spin))
            .route("/jackpots", web::get().to(active_jackpots))
            .route("/jackpots/{id}/amount", web::get().to(jackpot_amount))
            .route("/events", web::get().to(events)),
    );
}
