//! Privatisation Option Model
//!
//! A restaurant offering for private events. Pricing rules are stored
//! as data only; nothing evaluates them.

use async_graphql::{InputObject, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct PrivatisationOption {
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
    /// e.g. `full`, `partial`, `terrace`
    #[serde(default)]
    pub option_type: Option<String>,
    #[serde(default)]
    pub max_capacity: i32,
    #[serde(default)]
    pub max_duration_hours: Option<f64>,
    #[serde(default)]
    pub menu_options: Vec<MenuOption>,
    #[serde(default)]
    pub tarif: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub pricing_rules: Vec<PricingRule>,
    #[serde(default)]
    pub blackout_dates: Vec<NaiveDate>,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "MenuOptionInput")]
pub struct MenuOption {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "DateRangeInput")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "PricingRuleInput")]
pub struct PricingRule {
    /// Days of week the rule applies to
    #[serde(default)]
    pub day_pattern: Vec<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub price_flat: Option<f64>,
    #[serde(default)]
    pub min_spend: Option<f64>,
    #[serde(default)]
    pub deposit_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct PrivatisationOptionInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
    pub description: Option<String>,
    pub option_type: Option<String>,
    pub max_capacity: i32,
    pub max_duration_hours: Option<f64>,
    pub menu_options: Option<Vec<MenuOption>>,
    pub tarif: Option<f64>,
    pub conditions: Option<String>,
    pub pricing_rules: Option<Vec<PricingRule>>,
    pub blackout_dates: Option<Vec<NaiveDate>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct PrivatisationOptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_options: Option<Vec<MenuOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarif: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_rules: Option<Vec<PricingRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blackout_dates: Option<Vec<NaiveDate>>,
}

impl PrivatisationOption {
    pub fn from_input(input: PrivatisationOptionInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            name: input.name,
            description: input.description,
            option_type: input.option_type,
            max_capacity: input.max_capacity,
            max_duration_hours: input.max_duration_hours,
            menu_options: input.menu_options.unwrap_or_default(),
            tarif: input.tarif,
            conditions: input.conditions,
            pricing_rules: input.pricing_rules.unwrap_or_default(),
            blackout_dates: input.blackout_dates.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
