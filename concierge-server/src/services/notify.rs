//! Reservation push notifications
//!
//! Looks up the push tokens of a tenant's active users and hands the
//! messages to the [`NotificationDispatcher`]. Delivery happens on a
//! detached task; nothing here fails the calling mutation.

use std::sync::Arc;

use concierge_push::{
    ExpoProvider, FcmProvider, NotificationDispatcher, PushMessage, PushProvider,
};
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::config::Config;
use crate::db::models::Reservation;
use crate::db::repository::UserRepository;

#[derive(Clone)]
pub struct Notifier {
    users: UserRepository,
    dispatcher: NotificationDispatcher,
}

impl Notifier {
    pub fn new(db: Surreal<Db>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            users: UserRepository::new(db),
            dispatcher,
        }
    }

    /// Expo is always available; FCM needs a project id and an access token
    pub fn from_config(db: Surreal<Db>, config: &Config) -> Self {
        let mut providers: Vec<Arc<dyn PushProvider>> = Vec::new();

        if let (Some(project_id), Some(access_token)) =
            (&config.fcm_project_id, &config.fcm_access_token)
        {
            match FcmProvider::new(project_id.clone(), access_token.clone()) {
                Ok(fcm) => providers.push(Arc::new(fcm)),
                Err(e) => tracing::warn!(error = %e, "FCM disabled"),
            }
        }
        providers.push(Arc::new(ExpoProvider::new(config.expo_access_token.clone())));

        tracing::info!(providers = providers.len(), "Push notifications configured");
        Self::new(db, NotificationDispatcher::new(providers))
    }

    /// A notifier that drops every message
    pub fn disabled(db: Surreal<Db>) -> Self {
        Self::new(db, NotificationDispatcher::disabled())
    }

    pub async fn reservation_created(&self, reservation: &Reservation) {
        let body = format!(
            "{} booked for {}",
            reservation.customer_info.name,
            when(reservation)
        );
        self.notify_business(reservation, "New reservation", body, "reservation_created")
            .await;
    }

    pub async fn reservation_confirmed(&self, reservation: &Reservation) {
        let body = format!(
            "Reservation of {} for {} is confirmed",
            reservation.customer_info.name,
            when(reservation)
        );
        self.notify_business(reservation, "Reservation confirmed", body, "reservation_confirmed")
            .await;
    }

    async fn notify_business(
        &self,
        reservation: &Reservation,
        title: &str,
        body: String,
        event: &str,
    ) {
        if !self.dispatcher.is_enabled() {
            return;
        }

        let tokens = match self.users.push_tokens(&reservation.business_id).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(
                    business_id = %reservation.business_id,
                    error = %e,
                    "Failed to load push tokens"
                );
                return;
            }
        };
        if tokens.is_empty() {
            tracing::debug!(business_id = %reservation.business_id, "No push tokens registered");
            return;
        }

        let data = json!({
            "type": event,
            "reservationId": reservation.id_string(),
            "businessType": reservation.business_type.as_str(),
        });
        let messages = tokens
            .into_iter()
            .map(|token| PushMessage::new(token, title, body.clone()).with_data(data.clone()))
            .collect();

        // Detached; the handle is not awaited
        drop(self.dispatcher.dispatch(messages));
    }
}

fn when(reservation: &Reservation) -> String {
    match &reservation.time {
        Some(time) => format!("{} at {}", reservation.date, time),
        None => reservation.date.to_string(),
    }
}
