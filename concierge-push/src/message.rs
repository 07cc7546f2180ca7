//! Provider-neutral message and receipt types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A notification addressed to one device token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Device push token (Expo or FCM registration token)
    pub to: String,
    pub title: String,
    pub body: String,
    /// Extra key/value payload delivered to the app
    #[serde(default)]
    pub data: Option<Value>,
}

impl PushMessage {
    pub fn new(to: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            title: title.into(),
            body: body.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Where a message is in the provider's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Accepted by the provider; a receipt can be polled later
    Queued,
    /// Provider confirmed hand-off to the device platform
    Delivered,
    /// Rejected at send time or reported failed by a receipt
    Failed,
}

/// Provider-issued confirmation (or error) for one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub provider: String,
    pub to: String,
    /// Provider id: Expo ticket id or FCM message name
    pub id: Option<String>,
    pub status: DeliveryStatus,
    pub error: Option<String>,
}

impl DeliveryReceipt {
    pub fn queued(provider: &str, to: &str, id: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            to: to.to_string(),
            id: Some(id.into()),
            status: DeliveryStatus::Queued,
            error: None,
        }
    }

    pub fn delivered(provider: &str, to: &str, id: Option<String>) -> Self {
        Self {
            provider: provider.to_string(),
            to: to.to_string(),
            id,
            status: DeliveryStatus::Delivered,
            error: None,
        }
    }

    pub fn failed(provider: &str, to: &str, error: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            to: to.to_string(),
            id: None,
            status: DeliveryStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == DeliveryStatus::Failed
    }
}
