//! The capability every push backend implements

use async_trait::async_trait;

use crate::error::PushResult;
use crate::message::{DeliveryReceipt, PushMessage};

/// A push delivery backend
///
/// `send` is the only required delivery call. Providers that can submit
/// several messages per request override `send_batch`; providers with an
/// asynchronous receipt phase override `poll_receipts`.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Short provider name used in logs and receipts
    fn name(&self) -> &'static str;

    /// Whether this provider can deliver to the given device token
    fn accepts(&self, token: &str) -> bool;

    /// Submit one message
    async fn send(&self, message: &PushMessage) -> PushResult<DeliveryReceipt>;

    /// Submit many messages. A failure for one message becomes a failed
    /// receipt and does not stop the rest.
    async fn send_batch(&self, messages: &[PushMessage]) -> Vec<DeliveryReceipt> {
        let mut receipts = Vec::with_capacity(messages.len());
        for message in messages {
            match self.send(message).await {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => receipts.push(DeliveryReceipt::failed(
                    self.name(),
                    &message.to,
                    e.to_string(),
                )),
            }
        }
        receipts
    }

    /// Resolve queued receipts into their final status
    async fn poll_receipts(
        &self,
        receipts: Vec<DeliveryReceipt>,
    ) -> PushResult<Vec<DeliveryReceipt>> {
        Ok(receipts)
    }
}
