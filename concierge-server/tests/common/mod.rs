//! Test harness: real schema and router over a throwaway RocksDB store

#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use concierge_server::auth::Claims;
use concierge_server::services::Notifier;
use concierge_server::stripe::StripeClient;
use concierge_server::{AppState, Config, db};
use serde_json::Value;
use shared::UserRole;
use tempfile::TempDir;

/// Nothing listens here; checkout calls fail fast
pub const UNREACHABLE_STRIPE: &str = "http://127.0.0.1:9";

pub const HOTEL_ID: &str = "business:grand";
pub const RESTAURANT_ID: &str = "business:bistro";

/// Keep the `TempDir` alive for the duration of the test
pub async fn test_state() -> (AppState, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("concierge.db");
    let database = db::connect(path.to_str().unwrap(), "test", "test")
        .await
        .unwrap();

    let notifier = Notifier::disabled(database.clone());
    let stripe =
        StripeClient::new("sk_test_x", "whsec_test").with_base_url(UNREACHABLE_STRIPE);
    let state = AppState::with_parts(Config::default(), database, notifier, stripe);
    (state, tmp)
}

pub fn claims(state: &AppState, role: UserRole) -> Claims {
    let token = state
        .jwt
        .generate_token("user:tester", "tester@example.com", role)
        .unwrap();
    state.jwt.validate_token(&token).unwrap()
}

pub async fn execute(
    state: &AppState,
    query: &str,
    variables: Value,
    claims: Option<Claims>,
) -> Response {
    let mut request = Request::new(query).variables(Variables::from_json(variables));
    if let Some(claims) = claims {
        request = request.data(claims);
    }
    state.schema.execute(request).await
}

/// Run and return `data` as JSON, failing on any GraphQL error
pub async fn data(state: &AppState, query: &str, variables: Value, claims: Option<Claims>) -> Value {
    let response = execute(state, query, variables, claims).await;
    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

/// First error message of a request expected to fail
pub async fn error_message(
    state: &AppState,
    query: &str,
    variables: Value,
    claims: Option<Claims>,
) -> String {
    let response = execute(state, query, variables, claims).await;
    assert!(!response.errors.is_empty(), "expected an error");
    response.errors[0].message.clone()
}

pub const CREATE_ROOM: &str = r#"
    mutation($input: RoomInput!) {
        createRoom(input: $input) { id number capacity }
    }
"#;

pub const CREATE_RESERVATION: &str = r#"
    mutation($input: ReservationInput!) {
        createReservation(input: $input) { id status paymentStatus totalAmount date }
    }
"#;

pub fn customer() -> Value {
    serde_json::json!({ "name": "Jo Doe", "email": "jo@example.com", "phone": "0600000000" })
}
