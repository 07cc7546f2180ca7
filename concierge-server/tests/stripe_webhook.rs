//! Completed checkouts arriving on the webhook

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{CREATE_RESERVATION, HOTEL_ID, claims, customer, data, execute, test_state};
use concierge_server::api::create_router;
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;
use shared::UserRole;
use tower::ServiceExt;

const WEBHOOK_SECRET: &str = "whsec_test";

fn signature(payload: &str, secret: &str) -> String {
    let ts = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{ts}.").as_bytes());
    mac.update(payload.as_bytes());
    format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()))
}

fn webhook(payload: &str, signature: &str) -> Request<Body> {
    Request::post("/stripe/webhook")
        .header("stripe-signature", signature)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_completed_checkout_marks_payment_and_reservation_paid() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));

    let created = data(
        &state,
        CREATE_RESERVATION,
        json!({
            "input": {
                "businessId": HOTEL_ID,
                "businessType": "HOTEL",
                "totalAmount": 180.0,
                "booking": { "room": {
                    "roomId": "room:401",
                    "checkIn": "2024-06-01",
                    "checkOut": "2024-06-02",
                    "guests": 1,
                } },
                "customerInfo": customer(),
            }
        }),
        None,
    )
    .await;
    let reservation_id = created["createReservation"]["id"].as_str().unwrap().to_string();

    // The gateway is unreachable, but the payment record exists
    let response = execute(
        &state,
        r#"mutation($input: PaymentSessionInput!) { createPaymentSession(input: $input) { sessionId } }"#,
        json!({ "input": {
            "reservationId": reservation_id,
            "successUrl": "https://example.com/ok",
            "cancelUrl": "https://example.com/cancel",
        } }),
        None,
    )
    .await;
    assert_eq!(response.errors.len(), 1);
    let payments = data(
        &state,
        "{ payments(businessId: \"business:grand\") { id } }",
        json!({}),
        auth.clone(),
    )
    .await;
    let payment_id = payments["payments"][0]["id"].as_str().unwrap().to_string();

    let event = json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_test_1",
            "payment_intent": "pi_1",
            "customer": "cus_1",
            "metadata": { "paymentId": payment_id, "reservationId": reservation_id },
        } },
    })
    .to_string();

    let app = create_router(state.clone());
    let response = app
        .clone()
        .oneshot(webhook(&event, &signature(&event, WEBHOOK_SECRET)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result: Value = data(
        &state,
        r#"query($payment: ID!, $reservation: ID!) {
            payment(id: $payment) { status paymentIntent }
            reservation(id: $reservation) { paymentStatus }
        }"#,
        json!({ "payment": payment_id, "reservation": reservation_id }),
        auth,
    )
    .await;
    assert_eq!(result["payment"]["status"], "PAID");
    assert_eq!(result["payment"]["paymentIntent"], "pi_1");
    assert_eq!(result["reservation"]["paymentStatus"], "PAID");
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let (state, _tmp) = test_state().await;
    let app = create_router(state);
    let event = json!({ "type": "checkout.session.completed", "data": { "object": {} } }).to_string();

    let response = app
        .clone()
        .oneshot(webhook(&event, &signature(&event, "whsec_other")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unsigned = Request::post("/stripe/webhook")
        .body(Body::from(event))
        .unwrap();
    let response = app.oneshot(unsigned).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
