//! Registration, login and bearer tokens on the GraphQL endpoint

mod common;

use axum::body::Body;
use axum::http::{Request, header};
use common::{data, error_message, execute, test_state};
use concierge_server::api::create_router;
use concierge_server::graphql::guard::ACCESS_FORBIDDEN;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const REGISTER: &str = r#"
    mutation($input: RegisterInput!) {
        register(input: $input) { token user { id email role isActive businessType } }
    }
"#;

const LOGIN: &str = r#"
    mutation($input: LoginInput!) { login(input: $input) { token user { email lastLogin } } }
"#;

fn registration(email: &str, business_type: Option<&str>) -> Value {
    json!({
        "input": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "password": "secret-pass",
            "businessType": business_type,
        }
    })
}

#[tokio::test]
async fn test_manager_registration_waits_for_approval() {
    let (state, _tmp) = test_state().await;

    let result = data(&state, REGISTER, registration("Ada@Example.com", Some("SALON")), None).await;
    let user = &result["register"]["user"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["role"], "MANAGER");
    assert_eq!(user["isActive"], false);
    assert_eq!(user["businessType"], "SALON");
    assert!(!result["register"]["token"].as_str().unwrap().is_empty());

    let admin = data(&state, REGISTER, registration("root@example.com", None), None).await;
    assert_eq!(admin["register"]["user"]["role"], "ADMIN");
    assert_eq!(admin["register"]["user"]["isActive"], true);
}

#[tokio::test]
async fn test_duplicate_email_and_weak_password_are_rejected() {
    let (state, _tmp) = test_state().await;
    data(&state, REGISTER, registration("ada@example.com", None), None).await;

    let message = error_message(&state, REGISTER, registration("ada@example.com", None), None).await;
    assert_eq!(message, "User already exists with this email");

    let mut weak = registration("bob@example.com", None);
    weak["input"]["password"] = json!("123");
    let response = execute(&state, REGISTER, weak, None).await;
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn test_login_checks_password_and_records_last_login() {
    let (state, _tmp) = test_state().await;
    data(&state, REGISTER, registration("ada@example.com", None), None).await;

    let wrong = json!({ "input": { "email": "ada@example.com", "password": "nope-nope" } });
    assert_eq!(
        error_message(&state, LOGIN, wrong, None).await,
        "Invalid email or password"
    );
    let unknown = json!({ "input": { "email": "who@example.com", "password": "secret-pass" } });
    assert_eq!(
        error_message(&state, LOGIN, unknown, None).await,
        "Invalid email or password"
    );

    let ok = json!({ "input": { "email": "ada@example.com", "password": "secret-pass" } });
    let result = data(&state, LOGIN, ok, None).await;
    assert!(result["login"]["user"]["lastLogin"].as_i64().unwrap() > 0);
    let token = result["login"]["token"].as_str().unwrap();
    assert_eq!(
        state.jwt.validate_token(token).unwrap().email,
        "ada@example.com"
    );
}

async fn me_over_http(app: &axum::Router, authorization: Option<&str>) -> Value {
    let mut builder = Request::post("/graphql").header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = builder
        .body(Body::from(json!({ "query": "{ me { email } }" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_bearer_token_reaches_guarded_fields() {
    let (state, _tmp) = test_state().await;
    let registered = data(&state, REGISTER, registration("ada@example.com", None), None).await;
    let token = registered["register"]["token"].as_str().unwrap().to_string();
    let app = create_router(state);

    let body = me_over_http(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(body["data"]["me"]["email"], "ada@example.com");

    for authorization in [None, Some("Bearer not-a-token")] {
        let body = me_over_http(&app, authorization).await;
        assert_eq!(body["errors"][0]["message"], ACCESS_FORBIDDEN);
    }
}
