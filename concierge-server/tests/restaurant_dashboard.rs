//! Restaurant slots, occupancy and the back-office cancel

mod common;

use common::{CREATE_RESERVATION, RESTAURANT_ID, claims, customer, data, error_message, test_state};
use concierge_server::AppState;
use serde_json::{Value, json};
use shared::UserRole;

async fn book_table(state: &AppState, business_id: &str, date: &str, time: &str, party: i32) -> String {
    let result = data(
        state,
        CREATE_RESERVATION,
        json!({
            "input": {
                "businessId": business_id,
                "businessType": "RESTAURANT",
                "date": date,
                "time": time,
                "booking": { "table": { "tableId": "dining_table:t1", "partySize": party } },
                "customerInfo": customer(),
            }
        }),
        None,
    )
    .await;
    result["createReservation"]["id"].as_str().unwrap().to_string()
}

async fn slots(state: &AppState, business_id: &str, party: i32) -> Vec<Value> {
    let result = data(
        state,
        r#"query($businessId: ID!, $party: Int!) {
            slotAvailability(businessId: $businessId, businessType: RESTAURANT,
                             date: "2024-03-01", partySize: $party) { time available }
        }"#,
        json!({ "businessId": business_id, "party": party }),
        None,
    )
    .await;
    result["slotAvailability"].as_array().unwrap().clone()
}

fn slot<'a>(slots: &'a [Value], time: &str) -> &'a Value {
    slots.iter().find(|s| s["time"] == time).unwrap()
}

#[tokio::test]
async fn test_default_slots_take_one_reservation_each() {
    let (state, _tmp) = test_state().await;
    book_table(&state, RESTAURANT_ID, "2024-03-01", "19:00", 2).await;
    book_table(&state, RESTAURANT_ID, "2024-03-02", "20:00", 2).await;

    let slots = slots(&state, RESTAURANT_ID, 2).await;
    assert_eq!(slots.len(), 20);
    assert_eq!(slots[0], json!({ "time": "12:00", "available": true }));
    assert_eq!(slot(&slots, "19:00")["available"], false);
    assert_eq!(slot(&slots, "19:30")["available"], true);
    assert_eq!(slot(&slots, "20:00")["available"], true);
}

#[tokio::test]
async fn test_configured_service_drives_slots_and_occupancy() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));

    let created = data(
        &state,
        r#"mutation($input: BusinessInput!) { createBusiness(input: $input) { id } }"#,
        json!({
            "input": {
                "name": "Chez Nous",
                "businessType": "RESTAURANT",
                "settings": {
                    "openingHours": [{ "opening": "19:00", "closing": "20:00" }],
                    "slotIntervalMinutes": 60,
                    "totalCapacity": 10,
                },
            }
        }),
        None,
    )
    .await;
    let business_id = created["createBusiness"]["id"].as_str().unwrap().to_string();

    let booked = book_table(&state, &business_id, "2024-03-01", "19:00", 4).await;
    assert_eq!(
        slots(&state, &business_id, 4).await,
        vec![json!({ "time": "19:00", "available": false })]
    );
    assert!(slots(&state, "business:empty", 12).await.iter().all(|s| s["available"] == true));
    assert_eq!(
        slots(&state, &business_id, 12).await,
        vec![json!({ "time": "19:00", "available": false })]
    );

    data(
        &state,
        "mutation($id: ID!) { confirmReservation(id: $id) { status } }",
        json!({ "id": booked }),
        auth.clone(),
    )
    .await;

    let today = chrono::Utc::now().date_naive().to_string();
    let result = data(
        &state,
        r#"query($businessId: ID!, $day: NaiveDate!) {
            dashboardMetrics(businessId: $businessId, businessType: RESTAURANT, from: $day, to: $day) {
                confirmedGuests occupancyRate
            }
            reservationsByDate(businessId: $businessId, businessType: RESTAURANT, date: $day) {
                id status
            }
        }"#,
        json!({ "businessId": business_id, "day": today }),
        auth,
    )
    .await;
    assert_eq!(result["dashboardMetrics"]["confirmedGuests"], 4);
    assert_eq!(result["dashboardMetrics"]["occupancyRate"], 0.4);
    assert_eq!(
        result["reservationsByDate"],
        json!([{ "id": booked, "status": "CONFIRMED" }])
    );
}

#[tokio::test]
async fn test_admin_cancel_keeps_the_reservation() {
    let (state, _tmp) = test_state().await;
    let auth = Some(claims(&state, UserRole::Manager));
    let id = book_table(&state, RESTAURANT_ID, "2024-03-01", "19:00", 2).await;

    let cancel = "mutation($id: ID!) { cancelReservationAdmin(id: $id) { id status } }";
    let cancelled = data(&state, cancel, json!({ "id": id }), auth.clone()).await;
    assert_eq!(cancelled["cancelReservationAdmin"]["status"], "CANCELLED");

    let fetched = data(
        &state,
        "query($id: ID!) { reservation(id: $id) { status } }",
        json!({ "id": id }),
        auth.clone(),
    )
    .await;
    assert_eq!(fetched["reservation"]["status"], "CANCELLED");

    // Slot frees up once the booking is cancelled
    assert_eq!(slot(&slots(&state, RESTAURANT_ID, 2).await, "19:00")["available"], true);

    let message = error_message(
        &state,
        cancel,
        json!({ "id": "reservation:missing" }),
        auth,
    )
    .await;
    assert_eq!(message, "Reservation not found");
}
