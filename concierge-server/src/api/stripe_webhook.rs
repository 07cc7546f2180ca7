//! Stripe webhook handler
//!
//! POST /stripe/webhook: raw body, verified against `Stripe-Signature`

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::security_log;
use crate::state::AppState;
use crate::stripe::WebhookEvent;

/// Signature and parse failures are rejected; processing failures are only
/// logged so Stripe does not keep retrying
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(sig_header) = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
    else {
        tracing::warn!("Missing Stripe-Signature header");
        return StatusCode::BAD_REQUEST;
    };

    if let Err(e) = state.stripe.verify_webhook(&body, sig_header) {
        security_log!(WARN, "webhook_signature_rejected", error = %e);
        return StatusCode::BAD_REQUEST;
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse webhook JSON");
            return StatusCode::BAD_REQUEST;
        }
    };
    tracing::info!(event_type = %event.kind, "Received Stripe webhook");

    if let Some(checkout) = event.completed_checkout() {
        let session_id = checkout.id.clone();
        if let Err(e) = state.payments.handle_completed_checkout(checkout).await {
            tracing::error!(session_id = %session_id, error = %e, "Failed to record checkout");
        }
    }
    StatusCode::OK
}
