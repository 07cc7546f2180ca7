//! # concierge-push
//!
//! Push notification delivery behind one provider interface.
//!
//! ## Scope
//!
//! This crate handles HOW a notification reaches a device:
//! - FCM HTTP v1 (single message per call)
//! - Expo push service (chunked sends, then receipt polling)
//! - Background dispatch that never blocks the caller
//!
//! Deciding WHO gets notified and WHEN stays in the server.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use concierge_push::{ExpoProvider, NotificationDispatcher, PushMessage};
//!
//! let dispatcher = NotificationDispatcher::new(vec![Arc::new(ExpoProvider::new(None))]);
//! dispatcher.dispatch(vec![PushMessage::new(
//!     "ExponentPushToken[xxxx]",
//!     "New reservation",
//!     "Table for 4 at 20:00",
//! )]);
//! ```

mod dispatcher;
mod error;
mod expo;
mod fcm;
mod message;
mod provider;

// Re-exports
pub use dispatcher::NotificationDispatcher;
pub use error::{PushError, PushResult};
pub use expo::ExpoProvider;
pub use fcm::FcmProvider;
pub use message::{DeliveryReceipt, DeliveryStatus, PushMessage};
pub use provider::PushProvider;
