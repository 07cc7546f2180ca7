//! Reservation Model
//!
//! One record per booking. What is booked depends on the tenant kind and
//! is carried by [`Booking`]: a room stay, a restaurant table or a salon
//! service.

use async_graphql::{Enum, InputObject, OneofObject, SimpleObject, Union};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::BusinessType;
use surrealdb::RecordId;

use super::common::CustomerInfo;
use super::serde_helpers;

/// Default table sitting in minutes
pub const DEFAULT_TABLE_DURATION: i32 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Statuses that hold a room or table
    pub const BLOCKING: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    pub fn is_blocking(&self) -> bool {
        Self::BLOCKING.contains(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ReservationSource {
    #[default]
    Website,
    Phone,
    WalkIn,
    Admin,
    NewUi,
}

/// Hotel stay over `[check_in, check_out)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "RoomBookingInput")]
pub struct RoomBooking {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub guests: i32,
    #[serde(default)]
    pub adults: Option<i32>,
    #[serde(default)]
    pub children: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "TableBookingInput")]
pub struct TableBooking {
    pub table_id: String,
    pub party_size: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject, InputObject)]
#[graphql(input_name = "ServiceBookingInput")]
pub struct ServiceBooking {
    pub service_id: String,
    #[serde(default)]
    pub staff_id: Option<String>,
}

/// What a reservation holds, stored as `{ kind: "room", ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Union)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Booking {
    Room(RoomBooking),
    Table(TableBooking),
    Service(ServiceBooking),
}

impl Booking {
    /// Tenant kind this booking belongs to
    pub fn business_type(&self) -> BusinessType {
        match self {
            Self::Room(_) => BusinessType::Hotel,
            Self::Table(_) => BusinessType::Restaurant,
            Self::Service(_) => BusinessType::Salon,
        }
    }

    pub fn as_room(&self) -> Option<&RoomBooking> {
        match self {
            Self::Room(room) => Some(room),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableBooking> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Exactly one of `room`, `table` or `service`
#[derive(Debug, Clone, OneofObject)]
pub enum BookingInput {
    Room(RoomBooking),
    Table(TableBooking),
    Service(ServiceBooking),
}

impl From<BookingInput> for Booking {
    fn from(input: BookingInput) -> Self {
        match input {
            BookingInput::Room(room) => Booking::Room(room),
            BookingInput::Table(table) => Booking::Table(table),
            BookingInput::Service(service) => Booking::Service(service),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Reservation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    pub business_id: String,
    pub business_type: BusinessType,
    pub booking: Booking,
    pub customer_info: CustomerInfo,
    /// Registered user who made the booking, if any
    #[serde(default)]
    pub customer_id: Option<String>,
    pub date: NaiveDate,
    /// HH:mm
    #[serde(default)]
    pub time: Option<String>,
    /// Minutes
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub source: ReservationSource,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub reservation_file_url: Option<String>,
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

#[derive(Debug, Clone, InputObject)]
pub struct ReservationInput {
    pub business_id: String,
    pub business_type: BusinessType,
    pub booking: BookingInput,
    pub customer_info: CustomerInfo,
    pub customer_id: Option<String>,
    /// Defaults to the check-in date for rooms, otherwise today
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
    pub source: Option<ReservationSource>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub reservation_file_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, InputObject)]
pub struct ReservationUpdate {
    /// Replaces the whole booking when given
    #[serde(skip)]
    pub booking: Option<BookingInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_info: Option<CustomerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ReservationSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_sent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_file_url: Option<String>,
}

impl Reservation {
    pub fn from_input(input: ReservationInput, today: NaiveDate, now: i64) -> Self {
        let booking = Booking::from(input.booking);
        let date = input
            .date
            .or_else(|| booking.as_room().map(|room| room.check_in))
            .unwrap_or(today);
        let duration = match (&booking, input.duration) {
            (Booking::Table(_), None) => Some(DEFAULT_TABLE_DURATION),
            (_, duration) => duration,
        };

        Self {
            id: None,
            business_id: input.business_id,
            business_type: input.business_type,
            booking,
            customer_info: input.customer_info,
            customer_id: input.customer_id,
            date,
            time: input.time,
            duration,
            status: input.status.unwrap_or_default(),
            payment_status: input.payment_status.unwrap_or_default(),
            payment_method: input.payment_method,
            source: input.source.unwrap_or_default(),
            total_amount: input.total_amount,
            notes: input.notes,
            special_requests: input.special_requests,
            reminder_sent: false,
            reservation_file_url: input.reservation_file_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Booking kind agrees with the tenant kind
    pub fn booking_matches_tenant(&self) -> bool {
        self.booking.business_type() == self.business_type
    }
}
