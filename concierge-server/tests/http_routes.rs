//! Session, service-status and dashboard routes through the full router

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{claims, data, test_state};
use concierge_server::api::create_router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::UserRole;
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cookie, body)
}

fn post(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` part of a `Set-Cookie` header
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register_admin(state: &concierge_server::AppState) {
    data(
        state,
        r#"mutation($input: RegisterInput!) { register(input: $input) { token } }"#,
        json!({
            "input": {
                "firstName": "Olga",
                "lastName": "Ops",
                "email": "ops@example.com",
                "password": "secret-pass",
            }
        }),
        None,
    )
    .await;
}

async fn login(app: &Router) -> (String, Value) {
    let (status, set_cookie, body) = send(
        app,
        post(
            "/api/login",
            json!({ "email": "ops@example.com", "password": "secret-pass" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (cookie_pair(&set_cookie.unwrap()), body)
}

#[tokio::test]
async fn test_session_round_trip_and_logout() {
    let (state, _tmp) = test_state().await;
    register_admin(&state).await;
    let app = create_router(state);

    let (cookie, login_body) = login(&app).await;
    assert_eq!(login_body["isLoggedIn"], true);

    let (status, _, session) = send(&app, get("/api/session", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["token"], login_body["token"]);
    assert_eq!(session["user"]["email"], "ops@example.com");
    assert_eq!(session["user"]["role"], "admin");

    let (status, set_cookie, body) = send(
        &app,
        Request::delete("/api/session")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
    assert!(set_cookie.unwrap().contains("Max-Age=0"));

    let (status, _, body) = send(&app, get("/api/session", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "isLoggedIn": false }));

    // Logging out without a session is harmless
    let (status, _, body) = send(&app, post("/api/logout", json!({}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let (state, _tmp) = test_state().await;
    register_admin(&state).await;
    let app = create_router(state);

    let (status, set_cookie, _) = send(
        &app,
        post(
            "/api/login",
            json!({ "email": "ops@example.com", "password": "wrong-pass" }),
            None,
        ),
    )
    .await;
    assert!(status.is_client_error());
    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn test_switch_and_add_service() {
    let (state, _tmp) = test_state().await;
    register_admin(&state).await;
    let app = create_router(state);
    let (cookie, _) = login(&app).await;

    let (status, set_cookie, body) = send(
        &app,
        post(
            "/api/switch-service",
            json!({ "businessType": "hotel", "businessId": "business:h2" }),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
    let cookie = cookie_pair(&set_cookie.unwrap());

    let (_, set_cookie, _) = send(
        &app,
        post(
            "/api/add-service-session",
            json!({ "businessType": "restaurant", "businessId": "business:r1" }),
            Some(&cookie),
        ),
    )
    .await;
    let cookie = cookie_pair(&set_cookie.unwrap());

    let (_, _, session) = send(&app, get("/api/session", Some(&cookie))).await;
    assert_eq!(session["businessId"], "business:h2");
    assert_eq!(session["businessType"], "hotel");
    assert_eq!(
        session["services"],
        json!([{ "businessId": "business:r1", "businessType": "restaurant", "isActive": false }])
    );
}

#[tokio::test]
async fn test_service_routes_validate_body_then_session() {
    let (state, _tmp) = test_state().await;
    let app = create_router(state);

    let (status, _, _) = send(
        &app,
        post("/api/add-service-session", json!({ "businessType": "hotel" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        post(
            "/api/switch-service",
            json!({ "businessType": "hotel", "businessId": "business:h1" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_service_status_keeps_order_and_reports_failures_as_inactive() {
    let (state, _tmp) = test_state().await;
    let create = r#"
        mutation($input: BusinessInput!) { createBusiness(input: $input) { id isActive } }
    "#;
    let approved = data(
        &state,
        create,
        json!({ "input": { "name": "Grand", "businessType": "HOTEL" } }),
        None,
    )
    .await["createBusiness"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let pending = data(
        &state,
        create,
        json!({ "input": { "name": "Bistro", "businessType": "RESTAURANT" } }),
        None,
    )
    .await["createBusiness"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    data(
        &state,
        "mutation($id: ID!) { approveBusiness(id: $id) { isActive } }",
        json!({ "id": approved }),
        Some(claims(&state, UserRole::Admin)),
    )
    .await;

    let app = create_router(state);
    let (status, _, body) = send(
        &app,
        post(
            "/api/service-status",
            json!({ "services": [
                { "businessType": "restaurant", "businessId": pending },
                { "businessType": "HOTEL", "businessId": approved },
                { "note": "no type or id" },
                { "type": "Salon", "id": approved },
                { "type": "hotel", "id": approved },
                { "businessType": "spa", "businessId": "business:x" },
            ] }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["statuses"],
        json!([
            { "type": "restaurant", "id": pending, "isActive": false },
            { "type": "hotel", "id": approved, "isActive": true },
            { "type": "salon", "id": approved, "isActive": false },
            { "type": "hotel", "id": approved, "isActive": true },
            { "type": "spa", "id": "business:x", "isActive": false },
        ])
    );

    let (status, _, _) = send(&app, post("/api/service-status", json!({}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_shell_redirects_by_policy() {
    let (state, _tmp) = test_state().await;
    register_admin(&state).await;
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(get("/hotel/dashboard/rooms", None))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let (cookie, _) = login(&app).await;
    let response = app
        .clone()
        .oneshot(get("/hotel/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/admin");

    let (status, _, body) = send(&app, get("/admin/hotels", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"][0]["key"], "overview");
    assert_eq!(body["navigation"][1]["href"], "/admin/hotels");
}

#[tokio::test]
async fn test_hello_and_not_found() {
    let (state, _tmp) = test_state().await;
    let app = create_router(state);

    let (status, _, body) = send(&app, get("/hello", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "hello" }));

    let (status, _, body) = send(&app, get("/nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found - /nowhere" }));
}
