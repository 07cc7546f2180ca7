//! Stripe integration via REST API (no SDK dependency)
//!
//! Only what reservation payments need: one-off Checkout sessions and
//! signed webhook events.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::collections::HashMap;
use thiserror::Error;

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Accepted clock skew for webhook timestamps
pub const WEBHOOK_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("Stripe request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stripe API error: {0}")]
    Api(String),

    #[error("Webhook rejected: {0}")]
    Signature(&'static str),
}

/// One-off card payment for a reservation
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount: f64,
    pub currency: String,
    pub product_name: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: secret_key.into(),
            webhook_secret: webhook_secret.into(),
            base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// Point at another API host (tests, stripe-mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a Stripe Checkout Session (payment mode)
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, StripeError> {
        let resp: serde_json::Value = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&checkout_form(request))
            .send()
            .await?
            .json()
            .await?;

        serde_json::from_value::<CheckoutSession>(resp.clone())
            .map_err(|_| StripeError::Api(format!("create_checkout_session failed: {resp}")))
    }

    pub fn verify_webhook(&self, payload: &[u8], sig_header: &str) -> Result<(), StripeError> {
        verify_webhook_signature(
            payload,
            sig_header,
            &self.webhook_secret,
            chrono::Utc::now().timestamp(),
        )
        .map_err(StripeError::Signature)
    }
}

/// Smallest currency unit (cents)
pub fn unit_amount(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Append the Checkout session placeholder to a success URL
pub fn success_url_with_session(success_url: &str) -> String {
    let separator = if success_url.contains('?') { '&' } else { '?' };
    format!("{success_url}{separator}session_id={{CHECKOUT_SESSION_ID}}")
}

/// Form body of `POST /v1/checkout/sessions`
pub fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            request.currency.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            unit_amount(request.amount).to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.product_name.clone(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        (
            "success_url".to_string(),
            success_url_with_session(&request.success_url),
        ),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];
    for (key, value) in &request.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

/// Verify Stripe webhook signature (HMAC-SHA256)
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now: i64,
) -> Result<(), &'static str> {
    let mut timestamp = "";
    let mut signatures = Vec::new();
    for part in sig_header.split(',') {
        let part = part.trim();
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signatures.push(v);
        }
    }

    if timestamp.is_empty() || signatures.is_empty() {
        return Err("Invalid Stripe-Signature header");
    }

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    // Constant-time comparison via hmac::verify_slice; any v1 may match
    let matched = signatures.iter().any(|signature| {
        hex::decode(signature)
            .map(|sig_bytes| mac.clone().verify_slice(&sig_bytes).is_ok())
            .unwrap_or(false)
    });
    if !matched {
        return Err("Webhook signature mismatch");
    }

    let ts: i64 = timestamp.parse().map_err(|_| "Invalid timestamp")?;
    if (now - ts).abs() > WEBHOOK_TOLERANCE_SECS {
        return Err("Webhook timestamp too old");
    }

    Ok(())
}

/// Webhook envelope; only the parts used here
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    pub object: serde_json::Value,
}

/// `checkout.session.completed` payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletedCheckout {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl WebhookEvent {
    pub const CHECKOUT_COMPLETED: &'static str = "checkout.session.completed";

    /// The completed checkout, when this is one
    pub fn completed_checkout(&self) -> Option<CompletedCheckout> {
        if self.kind != Self::CHECKOUT_COMPLETED {
            return None;
        }
        serde_json::from_value(self.data.object.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str, ts: i64) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{ts}.").as_bytes());
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_webhook_signature() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let ts = 1_700_000_000;
        let header = format!("t={ts},v1={}", sign(payload, "whsec_test", ts));

        assert!(verify_webhook_signature(payload, &header, "whsec_test", ts + 10).is_ok());
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_other", ts),
            Err("Webhook signature mismatch")
        );
        assert_eq!(
            verify_webhook_signature(payload, &header, "whsec_test", ts + 301),
            Err("Webhook timestamp too old")
        );
        assert_eq!(
            verify_webhook_signature(payload, "v1=abc", "whsec_test", ts),
            Err("Invalid Stripe-Signature header")
        );
    }

    #[test]
    fn test_success_url_separator() {
        assert_eq!(
            success_url_with_session("https://x.test/ok"),
            "https://x.test/ok?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(
            success_url_with_session("https://x.test/ok?r=1"),
            "https://x.test/ok?r=1&session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_checkout_form_uses_cents_and_metadata() {
        let form = checkout_form(&CheckoutRequest {
            amount: 19.99,
            currency: "eur".into(),
            product_name: "Reservation reservation:r1".into(),
            success_url: "https://x.test/ok".into(),
            cancel_url: "https://x.test/cancel".into(),
            metadata: vec![("paymentId", "payment:p1".into())],
        });
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("1999"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("eur"));
        assert_eq!(get("metadata[paymentId]"), Some("payment:p1"));
        assert_eq!(get("mode"), Some("payment"));
    }

    #[test]
    fn test_completed_checkout_extraction() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"type":"checkout.session.completed","data":{"object":{
                "id":"cs_1","payment_intent":"pi_1",
                "metadata":{"paymentId":"payment:p1","reservationId":"reservation:r1"}}}}"#,
        )
        .unwrap();
        let checkout = event.completed_checkout().unwrap();
        assert_eq!(checkout.id, "cs_1");
        assert_eq!(checkout.metadata["reservationId"], "reservation:r1");

        let other: WebhookEvent =
            serde_json::from_str(r#"{"type":"invoice.paid","data":{"object":{}}}"#).unwrap();
        assert!(other.completed_checkout().is_none());
    }
}
