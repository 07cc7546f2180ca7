//! Guest Model (hotel customer profile)

use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::common::Address;
use super::serde_helpers;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum MembershipLevel {
    #[default]
    Regular,
    Silver,
    Gold,
    Platinum,
    Vip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    #[default]
    Active,
    Inactive,
    Blocked,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Guest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub membership_level: MembershipLevel,
    #[serde(default)]
    pub loyalty_points: i32,
    #[serde(default)]
    pub total_visits: i32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub last_visit: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: GuestPreferences,
    #[serde(default)]
    pub communication: CommunicationPreferences,
    #[serde(default)]
    pub status: GuestStatus,
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "GuestPreferencesInput")]
pub struct GuestPreferences {
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Opt-ins: email and phone on, SMS off unless chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "CommunicationPreferencesInput")]
pub struct CommunicationPreferences {
    pub email: bool,
    pub sms: bool,
    pub phone: bool,
}

impl Default for CommunicationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            phone: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct GuestInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub membership_level: Option<MembershipLevel>,
    pub preferences: Option<GuestPreferences>,
    pub communication: Option<CommunicationPreferences>,
    pub status: Option<GuestStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct GuestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_level: Option<MembershipLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_visits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<GuestPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication: Option<CommunicationPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GuestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Guest {
    pub fn from_input(input: GuestInput, now: i64) -> Self {
        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            membership_level: input.membership_level.unwrap_or_default(),
            loyalty_points: 0,
            total_visits: 0,
            total_spent: 0.0,
            last_visit: None,
            preferences: input.preferences.unwrap_or_default(),
            communication: input.communication.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            notes: input.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
