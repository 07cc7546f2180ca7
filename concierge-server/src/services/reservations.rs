//! Reservation workflow
//!
//! Creation checks that the booking kind fits the tenant, issues an invoice
//! for bookings that arrive already paid and notifies the tenant's staff.
//! Confirmation marks the booking paid and issues the invoice if missing.
//! Cancellation removes the reservation together with its invoices; the
//! back-office variant only flips the status and keeps the record.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{AppError, AppResult, BusinessType, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    Booking, PaymentStatus, Reservation, ReservationInput, ReservationStatus, ReservationUpdate,
};
use crate::db::repository::ReservationRepository;

use super::invoices::InvoiceService;
use super::notify::Notifier;

/// Update fields plus the converted booking
#[derive(Serialize)]
struct ReservationPatch {
    #[serde(flatten)]
    fields: ReservationUpdate,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking: Option<Booking>,
}

fn booking_mismatch(booking: &Booking, business_type: BusinessType) -> AppError {
    AppError::with_message(
        ErrorCode::BookingKindMismatch,
        format!(
            "A {} booking cannot be made with a {}",
            booking.business_type(),
            business_type
        ),
    )
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    invoices: InvoiceService,
    notifier: Notifier,
}

impl ReservationService {
    pub fn new(db: Surreal<Db>, notifier: Notifier) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            invoices: InvoiceService::new(db),
            notifier,
        }
    }

    pub async fn list(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<ReservationStatus>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .find_all(business_id, business_type, status, date)
            .await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Reservation>> {
        Ok(self.reservations.find_by_id(id).await?)
    }

    pub async fn require(&self, id: &str) -> AppResult<Reservation> {
        self.get(id).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::ReservationNotFound, "Reservation not found")
        })
    }

    pub async fn create(&self, input: ReservationInput) -> AppResult<Reservation> {
        let reservation =
            Reservation::from_input(input, shared::util::today(), shared::util::now_millis());
        if !reservation.booking_matches_tenant() {
            return Err(booking_mismatch(
                &reservation.booking,
                reservation.business_type,
            ));
        }

        let created = self.reservations.create(reservation).await?;
        let id = created.id_string();
        tracing::info!(
            reservation_id = %id,
            business_id = %created.business_id,
            business_type = %created.business_type,
            "Reservation created"
        );

        if created.payment_status == PaymentStatus::Paid {
            self.invoices
                .create_for_reservation(
                    &created.business_id,
                    created.business_type,
                    &id,
                    created.total_amount.unwrap_or_default(),
                )
                .await?;
        }

        self.notifier.reservation_created(&created).await;
        Ok(created)
    }

    /// A new booking must keep the reservation's kind
    pub async fn update(
        &self,
        id: &str,
        mut update: ReservationUpdate,
    ) -> AppResult<Option<Reservation>> {
        let booking = update.booking.take().map(Booking::from);
        if let Some(booking) = &booking {
            let Some(existing) = self.reservations.find_by_id(id).await? else {
                return Ok(None);
            };
            if booking.business_type() != existing.business_type {
                return Err(booking_mismatch(booking, existing.business_type));
            }
        }

        let patch = ReservationPatch {
            fields: update,
            booking,
        };
        Ok(self.reservations.update(id, patch).await?)
    }

    pub async fn confirm(&self, id: &str) -> AppResult<Option<Reservation>> {
        let update = ReservationUpdate {
            status: Some(ReservationStatus::Confirmed),
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        let Some(confirmed) = self.reservations.update(id, update).await? else {
            return Ok(None);
        };
        let reservation_id = confirmed.id_string();
        tracing::info!(reservation_id = %reservation_id, "Reservation confirmed");

        if self
            .invoices
            .find_by_reservation(&reservation_id)
            .await?
            .is_none()
        {
            self.invoices
                .create_for_reservation(
                    &confirmed.business_id,
                    confirmed.business_type,
                    &reservation_id,
                    confirmed.total_amount.unwrap_or_default(),
                )
                .await?;
        }

        self.notifier.reservation_confirmed(&confirmed).await;
        Ok(Some(confirmed))
    }

    /// Remove the reservation and its invoices; `false` when it does not exist
    pub async fn cancel(&self, id: &str) -> AppResult<bool> {
        let Some(reservation) = self.reservations.find_by_id(id).await? else {
            return Ok(false);
        };
        let reservation_id = reservation.id_string();

        self.invoices.delete_by_reservation(&reservation_id).await?;
        let deleted = self.reservations.delete(&reservation_id).await?;
        tracing::info!(reservation_id = %reservation_id, "Reservation cancelled");
        Ok(deleted)
    }

    /// Set the status to cancelled, keeping the reservation and its invoices
    pub async fn mark_cancelled(&self, id: &str) -> AppResult<Reservation> {
        let update = ReservationUpdate {
            status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };
        let cancelled = self.reservations.update(id, update).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::ReservationNotFound, "Reservation not found")
        })?;
        tracing::info!(reservation_id = %cancelled.id_string(), "Reservation marked cancelled");
        Ok(cancelled)
    }
}
