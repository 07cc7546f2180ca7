//! Menu Item Model (restaurant dish)

use async_graphql::{Enum, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    VeryHot,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct MenuItem {
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
    pub category: String,
    #[serde(default)]
    pub price: f64,
    /// Minutes
    #[serde(default)]
    pub prep_time: Option<i32>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub available: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_info: Vec<String>,
    #[serde(default)]
    pub spice_level: Option<SpiceLevel>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
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

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct MenuItemInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub prep_time: Option<i32>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
    pub allergens: Option<Vec<String>>,
    pub dietary_info: Option<Vec<String>>,
    pub spice_level: Option<SpiceLevel>,
    pub ingredients: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_info: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl MenuItem {
    pub fn from_input(input: MenuItemInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            name: input.name,
            description: input.description,
            category: input.category,
            price: input.price,
            prep_time: input.prep_time,
            available: input.available.unwrap_or(true),
            popular: input.popular.unwrap_or(false),
            allergens: input.allergens.unwrap_or_default(),
            dietary_info: input.dietary_info.unwrap_or_default(),
            spice_level: input.spice_level,
            ingredients: input.ingredients.unwrap_or_default(),
            images: input.images.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
