//! Payment Model (Stripe Checkout)

use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::business::DEFAULT_CURRENCY;
use super::serde_helpers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    #[default]
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Payment {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub reservation_id: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: PaymentState,
    #[serde(default)]
    pub stripe_session_id: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    /// Gateway customer id
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Payment {
    /// New pending payment for a reservation
    pub fn pending(
        business_id: impl Into<String>,
        business_type: BusinessType,
        reservation_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        now: i64,
    ) -> Self {
        Self {
            id: None,
            business_id: business_id.into(),
            business_type: Some(business_type),
            reservation_id: Some(reservation_id.into()),
            invoice_id: None,
            amount,
            currency: currency.into(),
            status: PaymentState::Pending,
            stripe_session_id: None,
            payment_intent: None,
            customer: None,
            payment_method: None,
            receipt_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
