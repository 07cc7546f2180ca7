//! Room Type Model
//!
//! A hotel's own room categories, exposed as `roomTypes`. Names are unique
//! per hotel among active entries.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct RoomCategory {
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
pub struct RoomCategoryInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
}

/// Only the name can change; the owning hotel is fixed
#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct RoomCategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RoomCategory {
    pub fn from_input(input: RoomCategoryInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            name: input.name.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
