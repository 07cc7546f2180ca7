//! Service layer
//!
//! Workflows that span several repositories or reach outside the process.
//! Plain CRUD goes straight from the resolvers to the repositories.
//!
//! - [`AuthService`] - registration and login
//! - [`AvailabilityService`] - free rooms and tables
//! - [`ReservationService`] - create/confirm/cancel with invoicing
//! - [`InvoiceService`] - item normalization and totals
//! - [`PaymentService`] - Stripe Checkout and webhook completion
//! - [`DashboardService`] - metrics and calendar
//! - [`Notifier`] - push notifications to tenant staff

pub mod auth;
pub mod availability;
pub mod dashboard;
pub mod documents;
pub mod invoices;
pub mod notify;
pub mod payments;
pub mod reservations;

pub use auth::AuthService;
pub use availability::AvailabilityService;
pub use dashboard::DashboardService;
pub use invoices::InvoiceService;
pub use notify::Notifier;
pub use payments::PaymentService;
pub use reservations::ReservationService;
