//! Payment Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{Payment, PaymentState};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "payment";

/// Fields filled in once the gateway reports a completed checkout
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentCompletion {
    pub status: PaymentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Payments of a business, newest first
    pub async fn find_all(&self, business_id: &str) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE business_id = $business_id ORDER BY created_at DESC")
            .bind(("business_id", business_id.to_string()))
            .await?
            .take(0)?;
        Ok(payments)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn find_by_session(&self, session_id: &str) -> RepoResult<Option<Payment>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE stripe_session_id = $session_id LIMIT 1")
            .bind(("session_id", session_id.to_string()))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments.into_iter().next())
    }

    pub async fn create(&self, payment: Payment) -> RepoResult<Payment> {
        self.base.create(TABLE, payment).await
    }

    pub async fn set_session(&self, id: &str, session_id: &str) -> RepoResult<Option<Payment>> {
        self.base
            .merge(
                TABLE,
                id,
                serde_json::json!({ "stripe_session_id": session_id }),
            )
            .await
    }

    pub async fn set_status(&self, id: &str, status: PaymentState) -> RepoResult<Option<Payment>> {
        self.complete(
            id,
            PaymentCompletion {
                status,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn complete(
        &self,
        id: &str,
        completion: PaymentCompletion,
    ) -> RepoResult<Option<Payment>> {
        self.base.merge(TABLE, id, completion).await
    }
}
