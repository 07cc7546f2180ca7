//! Shift Model (one scheduled work period for one staff member)

use async_graphql::{InputObject, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Shift {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub staff_id: String,
    pub date: NaiveDate,
    /// HH:mm
    pub start_time: String,
    /// HH:mm
    pub end_time: String,
    #[serde(default)]
    pub notes: Option<String>,
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
pub struct ShiftInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub staff_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct ShiftUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Shift {
    pub fn from_input(input: ShiftInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            staff_id: input.staff_id,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            notes: input.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
