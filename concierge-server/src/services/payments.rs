//! Reservation payments through Stripe Checkout
//!
//! A payment record is created PENDING before the Checkout session so the
//! webhook can find it by session id once Stripe reports completion.

use async_graphql::{InputObject, SimpleObject};
use shared::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::business::DEFAULT_CURRENCY;
use crate::db::models::{Payment, PaymentState, PaymentStatus, Reservation};
use crate::db::repository::payment::PaymentCompletion;
use crate::db::repository::{
    BusinessRepository, InvoiceRepository, PaymentRepository, ReservationRepository,
};
use crate::stripe::{CheckoutRequest, CompletedCheckout, StripeClient};

#[derive(Debug, Clone, InputObject)]
pub struct PaymentSessionInput {
    pub reservation_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct PaymentSession {
    pub session_id: String,
    pub url: Option<String>,
    pub payment_id: String,
}

/// Positive reservation total, if any
fn reservation_total(total_amount: Option<f64>) -> Option<f64> {
    total_amount.filter(|amount| *amount > 0.0)
}

/// Amount to charge: a positive reservation total, else its invoice total
pub fn payable_amount(total_amount: Option<f64>, invoice_total: Option<f64>) -> AppResult<f64> {
    match reservation_total(total_amount).or(invoice_total) {
        Some(amount) if amount > 0.0 => Ok(amount),
        _ => Err(AppError::with_message(
            ErrorCode::InvalidPaymentAmount,
            "Invalid reservation amount",
        )),
    }
}

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    reservations: ReservationRepository,
    invoices: InvoiceRepository,
    businesses: BusinessRepository,
    stripe: StripeClient,
}

impl PaymentService {
    pub fn new(db: Surreal<Db>, stripe: StripeClient) -> Self {
        Self {
            payments: PaymentRepository::new(db.clone()),
            reservations: ReservationRepository::new(db.clone()),
            invoices: InvoiceRepository::new(db.clone()),
            businesses: BusinessRepository::new(db),
            stripe,
        }
    }

    pub async fn list(&self, business_id: &str) -> AppResult<Vec<Payment>> {
        Ok(self.payments.find_all(business_id).await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Payment>> {
        Ok(self.payments.find_by_id(id).await?)
    }

    async fn currency(&self, reservation: &Reservation) -> AppResult<String> {
        let business = self.businesses.find_by_id(&reservation.business_id).await?;
        Ok(business
            .map(|b| b.settings.currency())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }

    pub async fn create_session(&self, input: PaymentSessionInput) -> AppResult<PaymentSession> {
        let reservation = self
            .reservations
            .find_by_id(&input.reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::ReservationNotFound, "Reservation not found")
            })?;
        let reservation_id = reservation.id_string();

        let invoice_total = match reservation_total(reservation.total_amount) {
            Some(_) => None,
            None => self
                .invoices
                .find_by_reservation(&reservation_id)
                .await?
                .map(|invoice| invoice.total),
        };
        let amount = payable_amount(reservation.total_amount, invoice_total)?;
        let currency = self.currency(&reservation).await?;

        let payment = self
            .payments
            .create(Payment::pending(
                reservation.business_id.clone(),
                reservation.business_type,
                reservation_id.clone(),
                amount,
                currency.clone(),
                shared::util::now_millis(),
            ))
            .await?;
        let payment_id = payment.id_string();

        let request = CheckoutRequest {
            amount,
            currency,
            product_name: format!("Reservation {}", reservation_id),
            success_url: input.success_url,
            cancel_url: input.cancel_url,
            metadata: vec![
                ("paymentId", payment_id.clone()),
                ("reservationId", reservation_id.clone()),
                ("businessId", reservation.business_id.clone()),
                ("businessType", reservation.business_type.as_str().to_string()),
            ],
        };

        let session = match self.stripe.create_checkout_session(&request).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(payment_id = %payment_id, error = %e, "Checkout session failed");
                self.payments
                    .set_status(&payment_id, PaymentState::Failed)
                    .await?;
                return Err(AppError::with_message(
                    ErrorCode::PaymentFailed,
                    "Payment session could not be created",
                ));
            }
        };

        self.payments.set_session(&payment_id, &session.id).await?;
        tracing::info!(
            payment_id = %payment_id,
            reservation_id = %reservation_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(PaymentSession {
            session_id: session.id,
            url: session.url,
            payment_id,
        })
    }

    /// Mark the payment and its reservation paid after a completed checkout
    pub async fn handle_completed_checkout(&self, checkout: CompletedCheckout) -> AppResult<()> {
        let payment = match checkout.metadata.get("paymentId") {
            Some(id) => self.payments.find_by_id(id).await?,
            None => None,
        };
        let payment = match payment {
            Some(payment) => Some(payment),
            None => self.payments.find_by_session(&checkout.id).await?,
        };
        let Some(payment) = payment else {
            tracing::warn!(session_id = %checkout.id, "Completed checkout has no matching payment");
            return Ok(());
        };
        let payment_id = payment.id_string();

        self.payments
            .complete(
                &payment_id,
                PaymentCompletion {
                    status: PaymentState::Paid,
                    payment_intent: checkout.payment_intent,
                    customer: checkout.customer,
                    ..Default::default()
                },
            )
            .await?;

        let reservation_id = payment
            .reservation_id
            .or_else(|| checkout.metadata.get("reservationId").cloned());
        if let Some(reservation_id) = reservation_id {
            let updated = self
                .reservations
                .update(
                    &reservation_id,
                    serde_json::json!({ "payment_status": PaymentStatus::Paid }),
                )
                .await?;
            if updated.is_none() {
                tracing::warn!(reservation_id = %reservation_id, "Paid reservation no longer exists");
            }
        }

        tracing::info!(payment_id = %payment_id, session_id = %checkout.id, "Payment completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payable_amount_prefers_reservation_total() {
        assert_eq!(payable_amount(Some(80.0), Some(120.0)).unwrap(), 80.0);
        assert_eq!(payable_amount(None, Some(120.0)).unwrap(), 120.0);
    }

    #[test]
    fn test_payable_amount_rejects_non_positive() {
        let err = payable_amount(None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPaymentAmount);
        assert_eq!(err.message, "Invalid reservation amount");
        assert!(payable_amount(Some(0.0), None).is_err());
        assert!(payable_amount(Some(-5.0), Some(0.0)).is_err());
    }

    #[test]
    fn test_payable_amount_falls_back_when_total_is_zero() {
        assert_eq!(payable_amount(Some(0.0), Some(50.0)).unwrap(), 50.0);
        assert_eq!(payable_amount(Some(-5.0), Some(100.0)).unwrap(), 100.0);
    }
}
