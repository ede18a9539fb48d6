use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 已认证的后台用户（令牌 sub）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

// 无需令牌的路径：文档与机台侧 floor 接口
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec!["/swagger-ui", "/swagger-ui/", "/api-docs/openapi.json"],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/", "/api/v1/floor/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS 预检直接放行
        if req.method() == Method::OPTIONS || self.public_paths.is_public_path(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let claims = match bearer_token(&req) {
            Some(token) => self.jwt_service.verify_access_token(token),
            None => Err(AppError::AuthError("Missing access token".to_string())),
        };

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(AuthenticatedUser(claims.sub));
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                let error = match e {
                    AppError::AuthError(_) => e,
                    _ => AppError::AuthError("Invalid access token".to_string()),
                };
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, http::StatusCode, web};

    async fn whoami(req: actix_web::HttpRequest) -> HttpResponse {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        HttpResponse::Ok().body(user.map(|u| u.0).unwrap_or_default())
    }

    #[test]
    fn test_public_paths() {
        let paths = PublicPaths::new();
        assert!(paths.is_public_path("/api/v1/floor/spin/Mega"));
        assert!(paths.is_public_path("/swagger-ui/index.html"));
        assert!(paths.is_public_path("/api-docs/openapi.json"));
        assert!(!paths.is_public_path("/api/v1/jackpots"));
        assert!(!paths.is_public_path("/api/v1/floorplan"));
    }

    #[actix_web::test]
    async fn test_requires_token_on_admin_routes() {
        let jwt = JwtService::new("secret", 3600);
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .route("/api/v1/user", web::get().to(whoami)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/v1/user").to_request();
        let err = actix_test::try_call_service(&app, req).await.err().unwrap();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

        let token = jwt.generate_access_token("uid-1").unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/user")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"uid-1");
    }
}
