use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use jackpot_backend::events::EventHub;
use jackpot_backend::middlewares::AuthMiddleware;
use jackpot_backend::services::{JackpotDirectory, JackpotService};
use jackpot_backend::store::MemoryJackpotStore;
use jackpot_backend::utils::JwtService;
use jackpot_backend::{extractor_config, handlers};

macro_rules! admin_app {
    ($jwt:expr) => {{
        let hub = EventHub::new(8);
        let service = JackpotService::new(
            Arc::new(MemoryJackpotStore::new()),
            JackpotDirectory::new(),
            hub.clone(),
        );
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($jwt))
                .configure(extractor_config)
                .app_data(web::Data::new(service))
                .app_data(web::Data::new(hub))
                .service(
                    web::scope("/api/v1")
                        .configure(handlers::floor_config)
                        .configure(handlers::jackpot_config),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn admin_routes_require_token() {
    let jwt = JwtService::new("test-secret", 3600);
    let app = admin_app!(jwt.clone());

    let req = test::TestRequest::get()
        .uri("/api/v1/jackpots/count")
        .to_request();
    let err = test::try_call_service(&app, req).await.err().unwrap();
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/jackpots/count")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let err = test::try_call_service(&app, req).await.err().unwrap();
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

    // floor 接口无需令牌
    let req = test::TestRequest::get()
        .uri("/api/v1/floor/jackpots")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn create_then_spin_then_reset() {
    let jwt = JwtService::new("test-secret", 3600);
    let token = jwt.generate_access_token("admin-1").unwrap();
    let auth = ("Authorization", format!("Bearer {token}"));
    let app = admin_app!(jwt);

    let req = test::TestRequest::post()
        .uri("/api/v1/jackpots")
        .insert_header(auth.clone())
        .set_json(json!({
            "id": "jp-1",
            "name": "Mega",
            "amount": "100.00",
            "max_amount": "100.00",
            "allowed_levels": [1]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["contributions"], 0);

    // 同名再次创建
    let req = test::TestRequest::post()
        .uri("/api/v1/jackpots")
        .insert_header(auth.clone())
        .set_json(json!({"name": "Mega", "amount": 0, "max_amount": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/floor/spin/Mega")
        .set_json(json!({"amount": "1.00", "player_level": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["payout"], "100.00");

    let req = test::TestRequest::post()
        .uri("/api/v1/jackpots/jp-1/reset")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["amount"], "0.00");
    assert_eq!(body["data"]["active"], false);
    assert_eq!(body["data"]["contributions"], 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/jackpots/count")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["count"], 1);
}
