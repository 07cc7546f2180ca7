//! Expo push service
//!
//! Messages go out in chunks of [`SEND_CHUNK_SIZE`]; each accepted message
//! yields a ticket id. Tickets are later resolved through the receipts
//! endpoint in chunks of [`RECEIPT_CHUNK_SIZE`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};

use crate::error::{PushError, PushResult};
use crate::message::{DeliveryReceipt, DeliveryStatus, PushMessage};
use crate::provider::PushProvider;

const EXPO_BASE_URL: &str = "https://exp.host";
pub const SEND_CHUNK_SIZE: usize = 100;
pub const RECEIPT_CHUNK_SIZE: usize = 300;

#[derive(Debug, Clone)]
pub struct ExpoProvider {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ExpoProvider {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: EXPO_BASE_URL.to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, body: &Value) -> PushResult<Value> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let json: Value = resp.json().await?;
        if !status.is_success() {
            return Err(PushError::Provider(format!("Expo returned {status}: {json}")));
        }
        Ok(json)
    }

    async fn send_chunk(&self, chunk: &[PushMessage]) -> PushResult<Vec<DeliveryReceipt>> {
        let body = Value::Array(chunk.iter().map(build_message).collect());
        let resp = self.post("/--/api/v2/push/send", &body).await?;
        parse_tickets(chunk, &resp)
    }
}

/// Whether a token has the Expo shape `ExponentPushToken[...]`
pub fn is_expo_token(token: &str) -> bool {
    (token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken["))
        && token.ends_with(']')
}

fn build_message(message: &PushMessage) -> Value {
    let mut value = json!({
        "to": message.to.replace('"', ""),
        "sound": "default",
        "title": message.title,
        "body": message.body,
    });
    if let Some(data) = &message.data {
        value["data"] = data.clone();
    }
    value
}

/// Map the `data` array of a send response onto the chunk, in order
fn parse_tickets(chunk: &[PushMessage], resp: &Value) -> PushResult<Vec<DeliveryReceipt>> {
    let tickets = resp["data"]
        .as_array()
        .ok_or_else(|| PushError::UnexpectedResponse(format!("missing ticket array: {resp}")))?;
    if tickets.len() != chunk.len() {
        return Err(PushError::UnexpectedResponse(format!(
            "expected {} tickets, got {}",
            chunk.len(),
            tickets.len()
        )));
    }

    Ok(chunk
        .iter()
        .zip(tickets)
        .map(|(msg, ticket)| match ticket["status"].as_str() {
            Some("ok") => match ticket["id"].as_str() {
                Some(id) => DeliveryReceipt::queued("expo", &msg.to, id),
                None => DeliveryReceipt::delivered("expo", &msg.to, None),
            },
            _ => DeliveryReceipt::failed("expo", &msg.to, describe_error(ticket)),
        })
        .collect())
}

/// Resolve queued receipts against a getReceipts response (`data` keyed by id)
fn apply_receipts(receipts: &mut [DeliveryReceipt], resp: &Value) -> PushResult<()> {
    let map = resp["data"]
        .as_object()
        .ok_or_else(|| PushError::UnexpectedResponse(format!("missing receipt map: {resp}")))?;
    let by_id: HashMap<&str, &Value> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();

    for receipt in receipts.iter_mut() {
        let Some(id) = receipt.id.as_deref() else {
            continue;
        };
        let Some(result) = by_id.get(id) else {
            continue;
        };
        match result["status"].as_str() {
            Some("ok") => receipt.status = DeliveryStatus::Delivered,
            Some("error") => {
                receipt.status = DeliveryStatus::Failed;
                receipt.error = Some(describe_error(result));
            }
            _ => {}
        }
    }
    Ok(())
}

fn describe_error(value: &Value) -> String {
    let message = value["message"].as_str().unwrap_or("unknown error");
    match value["details"]["error"].as_str() {
        Some(code) => format!("{message} ({code})"),
        None => message.to_string(),
    }
}

#[async_trait]
impl PushProvider for ExpoProvider {
    fn name(&self) -> &'static str {
        "expo"
    }

    fn accepts(&self, token: &str) -> bool {
        is_expo_token(token)
    }

    async fn send(&self, message: &PushMessage) -> PushResult<DeliveryReceipt> {
        let mut receipts = self.send_chunk(std::slice::from_ref(message)).await?;
        receipts
            .pop()
            .ok_or_else(|| PushError::UnexpectedResponse("empty ticket list".into()))
    }

    #[instrument(skip(self, messages), fields(provider = "expo", count = messages.len()))]
    async fn send_batch(&self, messages: &[PushMessage]) -> Vec<DeliveryReceipt> {
        let mut receipts = Vec::with_capacity(messages.len());
        for chunk in messages.chunks(SEND_CHUNK_SIZE) {
            match self.send_chunk(chunk).await {
                Ok(tickets) => receipts.extend(tickets),
                Err(e) => {
                    error!(error = %e, "Expo chunk send failed");
                    receipts.extend(
                        chunk
                            .iter()
                            .map(|m| DeliveryReceipt::failed("expo", &m.to, e.to_string())),
                    );
                }
            }
        }
        info!(tickets = receipts.len(), "Expo tickets collected");
        receipts
    }

    #[instrument(skip(self, receipts), fields(provider = "expo"))]
    async fn poll_receipts(
        &self,
        mut receipts: Vec<DeliveryReceipt>,
    ) -> PushResult<Vec<DeliveryReceipt>> {
        let ids: Vec<String> = receipts
            .iter()
            .filter(|r| r.status == DeliveryStatus::Queued)
            .filter_map(|r| r.id.clone())
            .collect();

        for chunk in ids.chunks(RECEIPT_CHUNK_SIZE) {
            match self
                .post("/--/api/v2/push/getReceipts", &json!({ "ids": chunk }))
                .await
            {
                Ok(resp) => apply_receipts(&mut receipts, &resp)?,
                Err(e) => warn!(error = %e, "Expo receipt poll failed"),
            }
        }
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(to: &str) -> PushMessage {
        PushMessage::new(to, "title", "body")
    }

    #[test]
    fn test_is_expo_token() {
        assert!(is_expo_token("ExponentPushToken[KYgN5sLygSPNbSwZzkiuz9]"));
        assert!(is_expo_token("ExpoPushToken[abc]"));
        assert!(!is_expo_token("fcm-registration-token"));
        assert!(!is_expo_token("ExponentPushToken[unterminated"));
    }

    #[test]
    fn test_build_message_strips_quotes() {
        let value = build_message(&msg("\"ExponentPushToken[a]\""));
        assert_eq!(value["to"], "ExponentPushToken[a]");
        assert_eq!(value["sound"], "default");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_parse_tickets_in_order() {
        let chunk = vec![msg("ExponentPushToken[a]"), msg("ExponentPushToken[b]")];
        let resp = json!({"data": [
            {"status": "ok", "id": "ticket-a"},
            {"status": "error", "message": "not registered", "details": {"error": "DeviceNotRegistered"}}
        ]});
        let receipts = parse_tickets(&chunk, &resp).unwrap();
        assert_eq!(receipts[0].status, DeliveryStatus::Queued);
        assert_eq!(receipts[0].id.as_deref(), Some("ticket-a"));
        assert!(receipts[1].is_failed());
        assert_eq!(
            receipts[1].error.as_deref(),
            Some("not registered (DeviceNotRegistered)")
        );
    }

    #[test]
    fn test_parse_tickets_length_mismatch() {
        let chunk = vec![msg("ExponentPushToken[a]")];
        let resp = json!({"data": []});
        assert!(parse_tickets(&chunk, &resp).is_err());
    }

    #[test]
    fn test_apply_receipts() {
        let mut receipts = vec![
            DeliveryReceipt::queued("expo", "a", "t1"),
            DeliveryReceipt::queued("expo", "b", "t2"),
            DeliveryReceipt::queued("expo", "c", "t3"),
        ];
        let resp = json!({"data": {
            "t1": {"status": "ok"},
            "t2": {"status": "error", "message": "rate limited", "details": {"error": "MessageRateExceeded"}}
        }});
        apply_receipts(&mut receipts, &resp).unwrap();
        assert_eq!(receipts[0].status, DeliveryStatus::Delivered);
        assert_eq!(receipts[1].status, DeliveryStatus::Failed);
        assert_eq!(receipts[2].status, DeliveryStatus::Queued);
    }

    #[test]
    fn test_chunk_sizes() {
        let messages: Vec<PushMessage> = (0..250)
            .map(|i| msg(&format!("ExponentPushToken[{i}]")))
            .collect();
        let sizes: Vec<usize> = messages.chunks(SEND_CHUNK_SIZE).map(|c| c.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }
}
