//! Restaurant Table Model
//!
//! Stored in `dining_table` (`table` is reserved in SurrealQL).

use async_graphql::{Enum, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::common::Position;
use super::serde_helpers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Table {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub number: i32,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub position: Option<Position>,
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
pub struct TableInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub number: i32,
    pub capacity: i32,
    pub location: Option<String>,
    pub status: Option<TableStatus>,
    pub features: Option<Vec<String>>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Table {
    pub fn from_input(input: TableInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            number: input.number,
            capacity: input.capacity,
            location: input.location,
            status: input.status.unwrap_or_default(),
            features: input.features.unwrap_or_default(),
            position: input.position,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
