//! Invoices, the confirm/cancel workflow and checkout sessions

mod common;

use common::{CREATE_RESERVATION, HOTEL_ID, claims, customer, data, error_message, test_state};
use concierge_server::AppState;
use serde_json::{Value, json};
use shared::UserRole;

const CREATE_INVOICE: &str = r#"
    mutation($input: InvoiceInput!) {
        createInvoice(input: $input) { id total items { description quantity total } }
    }
"#;

const INVOICES: &str = r#"
    query($reservationId: ID) {
        invoices(businessId: "business:grand", businessType: HOTEL, reservationId: $reservationId) {
            id total reservationId
        }
    }
"#;

async fn reserve(state: &AppState, total_amount: Option<f64>) -> String {
    let result = data(
        state,
        CREATE_RESERVATION,
        json!({
            "input": {
                "businessId": HOTEL_ID,
                "businessType": "HOTEL",
                "totalAmount": total_amount,
                "booking": { "room": {
                    "roomId": "room:301",
                    "checkIn": "2024-05-01",
                    "checkOut": "2024-05-03",
                    "guests": 2,
                } },
                "customerInfo": customer(),
            }
        }),
        None,
    )
    .await;
    result["createReservation"]["id"].as_str().unwrap().to_string()
}

async fn invoices_of(state: &AppState, reservation_id: &str) -> Vec<Value> {
    let result = data(
        state,
        INVOICES,
        json!({ "reservationId": reservation_id }),
        Some(claims(state, UserRole::Manager)),
    )
    .await;
    result["invoices"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_invoice_total_defaults_to_item_sum_and_explicit_total_is_kept() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));

    let computed = data(
        &state,
        CREATE_INVOICE,
        json!({
            "input": {
                "businessId": HOTEL_ID,
                "businessType": "HOTEL",
                "reservationId": "reservation:r1",
                "items": [
                    { "description": "Night", "price": 100.0, "quantity": 2 },
                    { "description": "Breakfast", "price": 15.0 },
                ],
            }
        }),
        auth.clone(),
    )
    .await;
    let invoice = &computed["createInvoice"];
    assert_eq!(invoice["total"], 215.0);
    assert_eq!(invoice["items"][0]["total"], 200.0);
    assert_eq!(invoice["items"][1]["quantity"], 1);

    // A total that disagrees with the items is stored as given
    let explicit = data(
        &state,
        CREATE_INVOICE,
        json!({
            "input": {
                "businessId": HOTEL_ID,
                "businessType": "HOTEL",
                "reservationId": "reservation:r2",
                "items": [{ "description": "Night", "price": 100.0, "quantity": 2 }],
                "total": 99.0,
            }
        }),
        auth,
    )
    .await;
    assert_eq!(explicit["createInvoice"]["total"], 99.0);
}

#[tokio::test]
async fn test_confirm_marks_paid_and_invoices_once() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));
    let reservation_id = reserve(&state, Some(240.0)).await;
    assert!(invoices_of(&state, &reservation_id).await.is_empty());

    let confirm = r#"
        mutation($id: ID!) { confirmReservation(id: $id) { status paymentStatus } }
    "#;
    let confirmed = data(&state, confirm, json!({ "id": reservation_id }), auth.clone()).await;
    assert_eq!(confirmed["confirmReservation"]["status"], "CONFIRMED");
    assert_eq!(confirmed["confirmReservation"]["paymentStatus"], "PAID");

    data(&state, confirm, json!({ "id": reservation_id }), auth).await;
    let invoices = invoices_of(&state, &reservation_id).await;
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["total"], 240.0);
    assert_eq!(invoices[0]["reservationId"], reservation_id.as_str());
}

#[tokio::test]
async fn test_cancel_removes_reservation_and_invoices() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));
    let reservation_id = reserve(&state, Some(80.0)).await;

    data(
        &state,
        "mutation($id: ID!) { confirmReservation(id: $id) { status } }",
        json!({ "id": reservation_id }),
        auth.clone(),
    )
    .await;
    assert_eq!(invoices_of(&state, &reservation_id).await.len(), 1);

    let cancelled = data(
        &state,
        "mutation($id: ID!) { cancelReservation(id: $id) }",
        json!({ "id": reservation_id }),
        auth.clone(),
    )
    .await;
    assert_eq!(cancelled["cancelReservation"], true);

    let fetched = data(
        &state,
        "query($id: ID!) { reservation(id: $id) { id } }",
        json!({ "id": reservation_id }),
        auth,
    )
    .await;
    assert!(fetched["reservation"].is_null());
    assert!(invoices_of(&state, &reservation_id).await.is_empty());
}

#[tokio::test]
async fn test_documents_are_base64_text() {
    let (state, _tmp) = test_state().await;
    let reservation_id = reserve(&state, Some(50.0)).await;

    let result = data(
        &state,
        "query($id: ID!) { reservationDocument(id: $id) }",
        json!({ "id": reservation_id }),
        Some(claims(&state, UserRole::Manager)),
    )
    .await;

    use base64::Engine;
    let encoded = result["reservationDocument"].as_str().unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    let text = String::from_utf8(decoded).unwrap();
    assert!(text.contains(&reservation_id));
    assert!(text.contains("Jo Doe"));
}

#[tokio::test]
async fn test_payment_session_rejects_zero_amount() {
    let (state, _tmp) = test_state().await;
    let reservation_id = reserve(&state, None).await;

    let message = error_message(
        &state,
        r#"mutation($input: PaymentSessionInput!) {
            createPaymentSession(input: $input) { sessionId url }
        }"#,
        json!({
            "input": {
                "reservationId": reservation_id,
                "successUrl": "https://example.com/ok",
                "cancelUrl": "https://example.com/cancel",
            }
        }),
        None,
    )
    .await;
    assert_eq!(message, "Invalid reservation amount");
}

#[tokio::test]
async fn test_unreachable_gateway_fails_the_payment() {
    let (state, _tmp) = test_state().await;
    let reservation_id = reserve(&state, Some(120.0)).await;

    let message = error_message(
        &state,
        r#"mutation($input: PaymentSessionInput!) {
            createPaymentSession(input: $input) { sessionId }
        }"#,
        json!({
            "input": {
                "reservationId": reservation_id,
                "successUrl": "https://example.com/ok",
                "cancelUrl": "https://example.com/cancel",
            }
        }),
        None,
    )
    .await;
    assert_eq!(message, "Payment session could not be created");

    let payments = data(
        &state,
        "{ payments(businessId: \"business:grand\") { status amount reservationId } }",
        json!({}),
        Some(claims(&state, UserRole::Manager)),
    )
    .await;
    let payments = payments["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["status"], "FAILED");
    assert_eq!(payments[0]["amount"], 120.0);
}

#[tokio::test]
async fn test_zero_reservation_total_charges_the_invoice_total() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));
    let reservation_id = reserve(&state, Some(0.0)).await;

    data(
        &state,
        CREATE_INVOICE,
        json!({
            "input": {
                "businessId": HOTEL_ID,
                "businessType": "HOTEL",
                "reservationId": reservation_id,
                "items": [{ "description": "Stay", "price": 100.0 }],
            }
        }),
        auth.clone(),
    )
    .await;

    // Amount check passes; only the unreachable gateway fails
    let message = error_message(
        &state,
        r#"mutation($input: PaymentSessionInput!) {
            createPaymentSession(input: $input) { sessionId }
        }"#,
        json!({
            "input": {
                "reservationId": reservation_id,
                "successUrl": "https://example.com/ok",
                "cancelUrl": "https://example.com/cancel",
            }
        }),
        None,
    )
    .await;
    assert_eq!(message, "Payment session could not be created");

    let payments = data(
        &state,
        "{ payments(businessId: \"business:grand\") { amount } }",
        json!({}),
        auth,
    )
    .await;
    assert_eq!(payments["payments"][0]["amount"], 100.0);
}

#[tokio::test]
async fn test_dashboard_metrics_and_calendar() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));

    let confirmed = reserve(&state, Some(300.0)).await;
    reserve(&state, Some(90.0)).await;
    data(
        &state,
        "mutation($id: ID!) { confirmReservation(id: $id) { status } }",
        json!({ "id": confirmed }),
        auth.clone(),
    )
    .await;

    let today = chrono::Utc::now().date_naive();
    let result = data(
        &state,
        r#"query($from: NaiveDate, $to: NaiveDate) {
            dashboardMetrics(businessId: "business:grand", businessType: HOTEL, from: $from, to: $to) {
                totalReservations revenue confirmedGuests
            }
            dashboardCalendar(businessId: "business:grand", businessType: HOTEL, month: "2024-05") {
                date count
            }
        }"#,
        json!({
            "from": (today - chrono::Days::new(1)).to_string(),
            "to": (today + chrono::Days::new(1)).to_string(),
        }),
        auth.clone(),
    )
    .await;

    let metrics = &result["dashboardMetrics"];
    assert_eq!(metrics["totalReservations"], 2);
    assert_eq!(metrics["revenue"], 300.0);
    assert_eq!(metrics["confirmedGuests"], 2);

    let days = result["dashboardCalendar"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[0], json!({ "date": "2024-05-01", "count": 2 }));
    assert_eq!(days[1]["count"], 0);

    let message = error_message(
        &state,
        r#"{ dashboardMetrics(businessId: "business:grand", businessType: HOTEL,
                              from: "2024-05-02", to: "2024-05-01") { revenue } }"#,
        json!({}),
        auth,
    )
    .await;
    assert_eq!(message, "End date is before start date");
}
