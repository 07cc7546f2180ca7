//! Business Model
//!
//! A hotel, restaurant or salon. New businesses wait inactive until an
//! administrator approves them.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::common::{Address, Contact};
use super::serde_helpers;

pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Business {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub name: String,
    pub business_type: BusinessType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub settings: BusinessSettings,
    /// Owning client (company)
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "BusinessSettingsInput")]
pub struct BusinessSettings {
    /// ISO currency code, lowercase; `usd` when unset
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    /// HH:mm
    #[serde(default)]
    pub check_in_time: Option<String>,
    /// HH:mm
    #[serde(default)]
    pub check_out_time: Option<String>,
    /// Restaurant service periods; 12:00-22:00 when unset
    #[serde(default)]
    pub opening_hours: Option<Vec<OpeningHours>>,
    /// Minutes between two bookable slots; 30 when unset
    #[serde(default)]
    pub slot_interval_minutes: Option<i32>,
    /// Reservations accepted per slot; 1 when unset
    #[serde(default)]
    pub max_reservations_per_slot: Option<i32>,
    /// Seats in the dining room
    #[serde(default)]
    pub total_capacity: Option<i32>,
}

/// One service period, `HH:mm` to `HH:mm`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "OpeningHoursInput")]
pub struct OpeningHours {
    pub opening: String,
    pub closing: String,
}

pub const DEFAULT_SLOT_INTERVAL: i32 = 30;

impl BusinessSettings {
    pub fn currency(&self) -> String {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_lowercase()
    }

    /// Configured service periods, or lunch-to-dinner by default
    pub fn service_periods(&self) -> Vec<OpeningHours> {
        match &self.opening_hours {
            Some(hours) if !hours.is_empty() => hours.clone(),
            _ => vec![OpeningHours {
                opening: "12:00".into(),
                closing: "22:00".into(),
            }],
        }
    }

    pub fn slot_interval(&self) -> i32 {
        self.slot_interval_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_SLOT_INTERVAL)
    }

    pub fn slot_capacity(&self) -> i32 {
        self.max_reservations_per_slot
            .filter(|max| *max > 0)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, InputObject)]
pub struct BusinessInput {
    pub name: String,
    pub business_type: BusinessType,
    pub description: Option<String>,
    pub address: Option<Address>,
    pub contact: Option<Contact>,
    pub settings: Option<BusinessSettings>,
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct BusinessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<BusinessSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Business {
    pub fn from_input(input: BusinessInput, now: i64) -> Self {
        Self {
            id: None,
            name: input.name,
            business_type: input.business_type,
            description: input.description,
            address: input.address,
            contact: input.contact,
            settings: input.settings.unwrap_or_default(),
            client_id: input.client_id,
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_defaults_and_lowercases() {
        assert_eq!(BusinessSettings::default().currency(), "usd");
        let eur = BusinessSettings {
            currency: Some("EUR".into()),
            ..Default::default()
        };
        assert_eq!(eur.currency(), "eur");
    }

    #[test]
    fn test_new_business_is_inactive() {
        let input = BusinessInput {
            name: "Le Petit".into(),
            business_type: BusinessType::Restaurant,
            description: None,
            address: None,
            contact: None,
            settings: None,
            client_id: None,
        };
        let business = Business::from_input(input, 42);
        assert!(!business.is_active);
        assert_eq!(business.created_at, 42);
    }
}
