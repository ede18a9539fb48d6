use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::EntityStatus;
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthenticatedUser;
use crate::models::*;
use crate::services::UserService;

fn get_user_id_from_request(req: &HttpRequest) -> AppResult<String> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.0.clone())
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当前登录用户", body = UserResponse),
        (status = 401, description = "未授权", body = ErrorBody),
        (status = 404, description = "用户不存在", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match get_user_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.current(&user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = UserResponse),
        (status = 400, description = "缺少必填字段", body = ErrorBody),
        (status = 409, description = "用户已存在", body = ErrorBody)
    )
)]
pub async fn create_user(
    user_service: web::Data<UserService>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    match user_service.create(request.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ActiveFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "后台用户列表", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<ActiveFilter>,
) -> Result<HttpResponse> {
    match user_service.list(&query.into_inner()).await {
        Ok(users) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": users
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "用户 ID")
    ),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = UserResponse),
        (status = 404, description = "用户不存在", body = ErrorBody)
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    match user_service
        .update(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/users/{id}/activate",
    tag = "users",
    params(
        ("id" = String, Path, description = "用户 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已启用", body = UserResponse),
        (status = 404, description = "用户不存在", body = ErrorBody)
    )
)]
pub async fn activate_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match user_service
        .set_status(&path.into_inner(), EntityStatus::Active)
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/users/{id}/deactivate",
    tag = "users",
    params(
        ("id" = String, Path, description = "用户 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已停用", body = UserResponse),
        (status = 404, description = "用户不存在", body = ErrorBody)
    )
)]
pub async fn deactivate_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match user_service
        .set_status(&path.into_inner(), EntityStatus::Inactive)
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::get().to(get_current_user)).service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}/activate", web::post().to(activate_user))
            .route("/{id}/deactivate", web::post().to(deactivate_user)),
    );
}
