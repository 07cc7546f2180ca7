//! Room Model

use async_graphql::{Enum, InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Suite,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Cleaning,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Room {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub number: String,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub price: f64,
    /// Square meters
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
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
pub struct RoomInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub number: String,
    pub room_type: Option<RoomType>,
    pub floor: Option<i32>,
    pub capacity: i32,
    pub price: f64,
    pub size: Option<f64>,
    pub status: Option<RoomStatus>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Room {
    pub fn from_input(input: RoomInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            number: input.number,
            room_type: input.room_type.unwrap_or_default(),
            floor: input.floor,
            capacity: input.capacity,
            price: input.price,
            size: input.size,
            status: input.status.unwrap_or_default(),
            amenities: input.amenities.unwrap_or_default(),
            images: input.images.unwrap_or_default(),
            description: input.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
