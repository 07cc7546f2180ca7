//! Fire-and-forget dispatch
//!
//! `dispatch` groups messages by the first provider that accepts their
//! token, then sends and polls on a detached tokio task. Nothing is
//! reported back to the caller; outcomes are logged.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::message::{DeliveryReceipt, PushMessage};
use crate::provider::PushProvider;

#[derive(Clone, Default)]
pub struct NotificationDispatcher {
    providers: Vec<Arc<dyn PushProvider>>,
}

impl NotificationDispatcher {
    /// Providers are tried in order when routing a token
    pub fn new(providers: Vec<Arc<dyn PushProvider>>) -> Self {
        Self { providers }
    }

    /// A dispatcher with no providers drops every message
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Split messages per provider; unroutable messages are returned separately
    fn route(
        &self,
        messages: Vec<PushMessage>,
    ) -> (Vec<(Arc<dyn PushProvider>, Vec<PushMessage>)>, Vec<PushMessage>) {
        let mut groups: Vec<(Arc<dyn PushProvider>, Vec<PushMessage>)> = self
            .providers
            .iter()
            .map(|p| (Arc::clone(p), Vec::new()))
            .collect();
        let mut unroutable = Vec::new();

        for message in messages {
            match groups.iter_mut().find(|(p, _)| p.accepts(&message.to)) {
                Some((_, bucket)) => bucket.push(message),
                None => unroutable.push(message),
            }
        }
        groups.retain(|(_, bucket)| !bucket.is_empty());
        (groups, unroutable)
    }

    /// Send in the background. The returned handle may be dropped.
    pub fn dispatch(&self, messages: Vec<PushMessage>) -> JoinHandle<Vec<DeliveryReceipt>> {
        let (groups, unroutable) = self.route(messages);
        for message in &unroutable {
            warn!(to = %message.to, "No push provider accepts token, message dropped");
        }

        tokio::spawn(async move {
            let mut all = Vec::new();
            for (provider, batch) in groups {
                let tickets = provider.send_batch(&batch).await;
                let receipts = match provider.poll_receipts(tickets.clone()).await {
                    Ok(receipts) => receipts,
                    Err(e) => {
                        error!(provider = provider.name(), error = %e, "Receipt polling failed");
                        tickets
                    }
                };
                for receipt in receipts.iter().filter(|r| r.is_failed()) {
                    error!(
                        provider = provider.name(),
                        to = %receipt.to,
                        error = receipt.error.as_deref().unwrap_or("unknown"),
                        "There was an error sending a notification"
                    );
                }
                info!(
                    provider = provider.name(),
                    sent = receipts.len(),
                    failed = receipts.iter().filter(|r| r.is_failed()).count(),
                    "Push batch finished"
                );
                all.extend(receipts);
            }
            all
        })
    }
}
