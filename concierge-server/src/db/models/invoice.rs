//! Invoice Model
//!
//! The total is expected to equal the sum of item totals but an explicit
//! total is stored as given.

use async_graphql::{InputObject, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Invoice {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub reservation_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct InvoiceItem {
    pub description: String,
    /// Unit price
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
}

/// Line item as submitted; quantity defaults to 1, total to price x quantity
#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct InvoiceItemInput {
    pub description: String,
    pub price: f64,
    pub quantity: Option<i32>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct InvoiceInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub reservation_id: String,
    pub date: Option<NaiveDate>,
    pub items: Vec<InvoiceItemInput>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<InvoiceItemInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl Invoice {
    /// Sum of the line totals
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }
}
