//! Reservations, invoices, payments and dashboard figures

use async_graphql::{Context, ID, Object, Result};
use chrono::NaiveDate;
use shared::BusinessType;

use crate::db::models::{
    Invoice, InvoiceInput, InvoiceUpdate, Payment, Reservation, ReservationInput,
    ReservationStatus, ReservationUpdate,
};
use crate::services::dashboard::{CalendarDay, DashboardMetrics, TimeSlot};
use crate::services::documents;
use crate::services::payments::{PaymentSession, PaymentSessionInput};
use crate::services::{DashboardService, InvoiceService, PaymentService, ReservationService};

use super::guard::{AuthGuard, GqlResultExt};

#[derive(Default)]
pub struct BookingQuery;

#[Object]
impl BookingQuery {
    /// Newest date first
    #[graphql(guard = "AuthGuard")]
    async fn reservations(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        status: Option<ReservationStatus>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>> {
        ctx.data::<ReservationService>()?
            .list(&business_id, business_type, status, date)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn reservation(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Reservation>> {
        ctx.data::<ReservationService>()?.get(&id).await.gql()
    }

    /// Base64 text document of a reservation
    #[graphql(guard = "AuthGuard")]
    async fn reservation_document(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let reservation = ctx.data::<ReservationService>()?.require(&id).await.gql()?;
        Ok(documents::encode(&documents::reservation_document(&reservation)))
    }

    #[graphql(guard = "AuthGuard")]
    async fn invoices(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        reservation_id: Option<ID>,
    ) -> Result<Vec<Invoice>> {
        ctx.data::<InvoiceService>()?
            .list(&business_id, business_type, reservation_id.map(|id| id.0))
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn invoice(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Invoice>> {
        ctx.data::<InvoiceService>()?.get(&id).await.gql()
    }

    /// Base64 text document of an invoice
    #[graphql(guard = "AuthGuard")]
    async fn invoice_document(&self, ctx: &Context<'_>, id: ID) -> Result<String> {
        let invoice = ctx.data::<InvoiceService>()?.require(&id).await.gql()?;
        Ok(documents::encode(&documents::invoice_document(&invoice)))
    }

    /// Newest first
    #[graphql(guard = "AuthGuard")]
    async fn payments(&self, ctx: &Context<'_>, business_id: ID) -> Result<Vec<Payment>> {
        ctx.data::<PaymentService>()?.list(&business_id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn payment(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Payment>> {
        ctx.data::<PaymentService>()?.get(&id).await.gql()
    }

    /// Reservations created between `from` and `to` (default today)
    #[graphql(guard = "AuthGuard")]
    async fn dashboard_metrics(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<DashboardMetrics> {
        ctx.data::<DashboardService>()?
            .metrics(&business_id, business_type, from, to)
            .await
            .gql()
    }

    /// Reservation count per day of a `YYYY-MM` month
    #[graphql(guard = "AuthGuard")]
    async fn dashboard_calendar(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        month: String,
    ) -> Result<Vec<CalendarDay>> {
        ctx.data::<DashboardService>()?
            .calendar(&business_id, business_type, &month)
            .await
            .gql()
    }

    /// Reservations created on `date`, newest first
    #[graphql(guard = "AuthGuard")]
    async fn reservations_by_date(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        ctx.data::<DashboardService>()?
            .reservations_by_date(&business_id, business_type, date)
            .await
            .gql()
    }

    /// Bookable restaurant slots on `date`
    async fn slot_availability(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        date: NaiveDate,
        party_size: i32,
    ) -> Result<Vec<TimeSlot>> {
        ctx.data::<DashboardService>()?
            .slot_availability(&business_id, business_type, date, party_size)
            .await
            .gql()
    }
}

#[derive(Default)]
pub struct BookingMutation;

#[Object]
impl BookingMutation {
    /// Public booking entry point
    async fn create_reservation(
        &self,
        ctx: &Context<'_>,
        input: ReservationInput,
    ) -> Result<Reservation> {
        ctx.data::<ReservationService>()?.create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_reservation(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ReservationUpdate,
    ) -> Result<Option<Reservation>> {
        ctx.data::<ReservationService>()?
            .update(&id, input)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn confirm_reservation(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Reservation>> {
        ctx.data::<ReservationService>()?.confirm(&id).await.gql()
    }

    /// Deletes the reservation and its invoices
    #[graphql(guard = "AuthGuard")]
    async fn cancel_reservation(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        ctx.data::<ReservationService>()?.cancel(&id).await.gql()
    }

    /// Marks the reservation cancelled and keeps it on record
    #[graphql(guard = "AuthGuard")]
    async fn cancel_reservation_admin(&self, ctx: &Context<'_>, id: ID) -> Result<Reservation> {
        ctx.data::<ReservationService>()?.mark_cancelled(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_invoice(&self, ctx: &Context<'_>, input: InvoiceInput) -> Result<Invoice> {
        ctx.data::<InvoiceService>()?.create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_invoice(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: InvoiceUpdate,
    ) -> Result<Option<Invoice>> {
        ctx.data::<InvoiceService>()?.update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_invoice(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        ctx.data::<InvoiceService>()?.delete(&id).await.gql()
    }

    /// Stripe Checkout for a reservation
    async fn create_payment_session(
        &self,
        ctx: &Context<'_>,
        input: PaymentSessionInput,
    ) -> Result<PaymentSession> {
        ctx.data::<PaymentService>()?
            .create_session(input)
            .await
            .gql()
    }
}
