//! Salon Service Model

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Service {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Minutes
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub available: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub options: Vec<ServiceOption>,
    #[serde(default)]
    pub default_staff_id: Option<String>,
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

/// Add-on for a service; `duration_impact` is extra minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "ServiceOptionInput")]
pub struct ServiceOption {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration_impact: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct ServiceInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: i32,
    pub price: f64,
    pub available: Option<bool>,
    pub popular: Option<bool>,
    pub options: Option<Vec<ServiceOption>>,
    pub default_staff_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ServiceOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_staff_id: Option<String>,
}

impl Service {
    pub fn from_input(input: ServiceInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            name: input.name,
            description: input.description,
            category: input.category,
            duration: input.duration,
            price: input.price,
            available: input.available.unwrap_or(true),
            popular: input.popular.unwrap_or(false),
            options: input.options.unwrap_or_default(),
            default_staff_id: input.default_staff_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
