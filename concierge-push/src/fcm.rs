//! Firebase Cloud Messaging (HTTP v1)
//!
//! One request per message. FCM answers synchronously, so the receipt is
//! final as soon as `send` returns.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{PushError, PushResult};
use crate::expo::is_expo_token;
use crate::message::{DeliveryReceipt, PushMessage};
use crate::provider::PushProvider;

const FCM_BASE_URL: &str = "https://fcm.googleapis.com";

/// FCM provider authenticated with an OAuth2 access token
#[derive(Debug, Clone)]
pub struct FcmProvider {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

impl FcmProvider {
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> PushResult<Self> {
        let project_id = project_id.into();
        let access_token = access_token.into();
        if project_id.is_empty() {
            return Err(PushError::InvalidConfig("FCM project id is empty".into()));
        }
        if access_token.is_empty() {
            return Err(PushError::InvalidConfig("FCM access token is empty".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: FCM_BASE_URL.to_string(),
            project_id,
            access_token,
        })
    }

    /// Point the provider at another host (emulators)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

/// FCM v1 request body. `data` values must be strings.
fn build_body(message: &PushMessage) -> Value {
    let mut body = json!({
        "message": {
            "token": message.to,
            "notification": {
                "title": message.title,
                "body": message.body,
            },
        }
    });
    if let Some(Value::Object(map)) = &message.data {
        let data: serde_json::Map<String, Value> = map
            .iter()
            .map(|(k, v)| {
                let s = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), Value::String(s))
            })
            .collect();
        body["message"]["data"] = Value::Object(data);
    }
    body
}

/// Turn an FCM response into a receipt
fn parse_response(provider: &str, to: &str, status_ok: bool, resp: &Value) -> DeliveryReceipt {
    if status_ok && let Some(name) = resp["name"].as_str() {
        return DeliveryReceipt::delivered(provider, to, Some(name.to_string()));
    }
    let error = resp["error"]["message"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| format!("FCM send failed: {resp}"));
    DeliveryReceipt::failed(provider, to, error)
}

#[async_trait]
impl PushProvider for FcmProvider {
    fn name(&self) -> &'static str {
        "fcm"
    }

    /// Any device token except Expo-shaped ones
    fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && !is_expo_token(token)
    }

    #[instrument(skip(self, message), fields(provider = "fcm"))]
    async fn send(&self, message: &PushMessage) -> PushResult<DeliveryReceipt> {
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.access_token)
            .json(&build_body(message))
            .send()
            .await?;
        let status_ok = resp.status().is_success();
        let body: Value = resp.json().await?;
        let receipt = parse_response(self.name(), &message.to, status_ok, &body);
        info!(status = ?receipt.status, "FCM message submitted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::DeliveryStatus;

    #[test]
    fn test_new_rejects_empty_config() {
        assert!(FcmProvider::new("", "token").is_err());
        assert!(FcmProvider::new("project", "").is_err());
    }

    #[test]
    fn test_accepts_device_tokens_but_not_expo_tokens() {
        let fcm = FcmProvider::new("demo", "t").unwrap();
        assert!(fcm.accepts("fMEQ8kz3:APA91bH"));
        assert!(!fcm.accepts("ExponentPushToken[abc]"));
        assert!(!fcm.accepts("ExpoPushToken[abc]"));
        assert!(!fcm.accepts(""));
    }

    #[test]
    fn test_endpoint() {
        let fcm = FcmProvider::new("demo", "t")
            .unwrap()
            .with_base_url("http://localhost:9099/");
        assert_eq!(
            fcm.endpoint(),
            "http://localhost:9099/v1/projects/demo/messages:send"
        );
    }

    #[test]
    fn test_build_body_stringifies_data() {
        let msg = PushMessage::new("device-token", "Hi", "There")
            .with_data(json!({"reservationId": "reservation:1", "guests": 2}));
        let body = build_body(&msg);
        assert_eq!(body["message"]["token"], "device-token");
        assert_eq!(body["message"]["notification"]["title"], "Hi");
        assert_eq!(body["message"]["data"]["guests"], "2");
        assert_eq!(body["message"]["data"]["reservationId"], "reservation:1");
    }

    #[test]
    fn test_parse_response() {
        let ok = parse_response(
            "fcm",
            "t",
            true,
            &json!({"name": "projects/demo/messages/123"}),
        );
        assert_eq!(ok.status, DeliveryStatus::Delivered);
        assert_eq!(ok.id.as_deref(), Some("projects/demo/messages/123"));

        let err = parse_response(
            "fcm",
            "t",
            false,
            &json!({"error": {"message": "Requested entity was not found."}}),
        );
        assert!(err.is_failed());
        assert_eq!(err.error.as_deref(), Some("Requested entity was not found."));
    }
}
