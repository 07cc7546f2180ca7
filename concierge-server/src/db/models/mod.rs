//! Database Models
//!
//! Every record stores its tenant as `business_id` + `business_type`,
//! carries an `is_active` soft-delete flag and millisecond timestamps.
//! Field names are snake_case in the store and camelCase in GraphQL.

// Serde helpers
pub mod serde_helpers;

pub mod common;

// Accounts
pub mod business;
pub mod client;
pub mod user;

// Customers and staff
pub mod guest;
pub mod shift;
pub mod staff;

// Catalog
pub mod menu_item;
pub mod privatisation;
pub mod room;
pub mod room_type;
pub mod service;
pub mod table;

// Bookings and billing
pub mod invoice;
pub mod payment;
pub mod reservation;

// Re-exports
pub use business::{Business, BusinessInput, BusinessSettings, BusinessUpdate};
pub use client::{Client, ClientInput, ClientModules, ClientUpdate};
pub use common::{Address, Contact, CustomerInfo, Position};
pub use guest::{
    CommunicationPreferences, Guest, GuestInput, GuestPreferences, GuestStatus, GuestUpdate,
    MembershipLevel,
};
pub use invoice::{Invoice, InvoiceInput, InvoiceItem, InvoiceItemInput, InvoiceUpdate};
pub use menu_item::{MenuItem, MenuItemInput, MenuItemUpdate, SpiceLevel};
pub use payment::{Payment, PaymentState};
pub use privatisation::{
    DateRange, MenuOption, PricingRule, PrivatisationOption, PrivatisationOptionInput,
    PrivatisationOptionUpdate,
};
pub use reservation::{
    Booking, BookingInput, DEFAULT_TABLE_DURATION, PaymentStatus, Reservation, ReservationInput,
    ReservationSource, ReservationStatus, ReservationUpdate, RoomBooking, ServiceBooking,
    TableBooking,
};
pub use room::{Room, RoomInput, RoomStatus, RoomType, RoomUpdate};
pub use room_type::{RoomCategory, RoomCategoryInput, RoomCategoryUpdate};
pub use service::{Service, ServiceInput, ServiceOption, ServiceUpdate};
pub use shift::{Shift, ShiftInput, ShiftUpdate};
pub use staff::{AvailabilitySlot, Staff, StaffInput, StaffStatus, StaffUpdate};
pub use table::{Table, TableInput, TableStatus, TableUpdate};
pub use user::{User, UserService, UserUpdate};

/// GraphQL `id` field (`table:key`) plus an `id_string` accessor
macro_rules! record_id_field {
    ($($model:ty),+ $(,)?) => {
        $(
            #[async_graphql::ComplexObject]
            impl $model {
                async fn id(&self) -> async_graphql::ID {
                    async_graphql::ID(self.id_string())
                }
            }

            impl $model {
                pub fn id_string(&self) -> String {
                    self.id.as_ref().map(ToString::to_string).unwrap_or_default()
                }
            }
        )+
    };
}

record_id_field!(
    Business,
    Client,
    User,
    Guest,
    Staff,
    Shift,
    Room,
    RoomCategory,
    Table,
    Service,
    MenuItem,
    PrivatisationOption,
    Invoice,
    Payment,
    Reservation,
);
