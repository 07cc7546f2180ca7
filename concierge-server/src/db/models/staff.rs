//! Staff Model

use async_graphql::{Enum, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Staff {
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
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub status: StaffStatus,
    /// Weekly availability
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    /// Freeform schedule note
    #[serde(default)]
    pub schedule: Option<String>,
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
#[graphql(input_name = "AvailabilitySlotInput")]
pub struct AvailabilitySlot {
    /// Day of week, e.g. `monday`
    pub day: String,
    /// HH:mm
    pub start_time: String,
    /// HH:mm
    pub end_time: String,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct StaffInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hourly_rate: Option<f64>,
    pub specialties: Option<Vec<String>>,
    pub status: Option<StaffStatus>,
    pub availability: Option<Vec<AvailabilitySlot>>,
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct StaffUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<AvailabilitySlot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

impl Staff {
    pub fn from_input(input: StaffInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            name: input.name,
            role: input.role,
            email: input.email,
            phone: input.phone,
            hourly_rate: input.hourly_rate,
            specialties: input.specialties.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            availability: input.availability.unwrap_or_default(),
            schedule: input.schedule,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
