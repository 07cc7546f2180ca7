//! Invoice creation and updates
//!
//! Line items are normalized on the way in (quantity defaults to 1, line
//! total to price x quantity). The invoice total defaults to the sum of
//! line totals; an explicit total is stored as given even when it does not
//! match.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{AppError, AppResult, BusinessType, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Invoice, InvoiceInput, InvoiceItem, InvoiceItemInput, InvoiceUpdate};
use crate::db::repository::InvoiceRepository;

/// Items of an invoice generated for a reservation
pub fn reservation_item(reservation_id: &str, amount: f64) -> InvoiceItem {
    InvoiceItem {
        description: format!("Reservation {}", reservation_id),
        price: amount,
        quantity: 1,
        total: amount,
    }
}

pub fn normalize_item(input: InvoiceItemInput) -> InvoiceItem {
    let quantity = input.quantity.unwrap_or(1);
    InvoiceItem {
        total: input.total.unwrap_or(input.price * f64::from(quantity)),
        description: input.description,
        price: input.price,
        quantity,
    }
}

pub fn build_invoice(input: InvoiceInput, today: NaiveDate, now: i64) -> Invoice {
    let items: Vec<InvoiceItem> = input.items.into_iter().map(normalize_item).collect();
    let total = input
        .total
        .unwrap_or_else(|| items.iter().map(|item| item.total).sum());

    Invoice {
        id: None,
        business_id: input.business_id,
        business_type: input.business_type,
        reservation_id: input.reservation_id,
        date: input.date.unwrap_or(today),
        items,
        total,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Debug, Default, Serialize)]
struct InvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<InvoiceItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<f64>,
}

/// New items without a new total recompute the total
fn patch_from_update(update: InvoiceUpdate) -> InvoicePatch {
    let items: Option<Vec<InvoiceItem>> = update
        .items
        .map(|items| items.into_iter().map(normalize_item).collect());
    let total = update.total.or_else(|| {
        items
            .as_ref()
            .map(|items| items.iter().map(|item| item.total).sum())
    });
    InvoicePatch {
        date: update.date,
        items,
        total,
    }
}

#[derive(Clone)]
pub struct InvoiceService {
    invoices: InvoiceRepository,
}

impl InvoiceService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            invoices: InvoiceRepository::new(db),
        }
    }

    pub async fn list(
        &self,
        business_id: &str,
        business_type: BusinessType,
        reservation_id: Option<String>,
    ) -> AppResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .find_all(business_id, business_type, reservation_id)
            .await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Option<Invoice>> {
        Ok(self.invoices.find_by_id(id).await?)
    }

    pub async fn create(&self, input: InvoiceInput) -> AppResult<Invoice> {
        let invoice = build_invoice(input, shared::util::today(), shared::util::now_millis());
        if (invoice.items_total() - invoice.total).abs() > 0.005 {
            tracing::debug!(
                reservation_id = %invoice.reservation_id,
                total = invoice.total,
                items_total = invoice.items_total(),
                "Invoice total differs from its items"
            );
        }
        let invoice = self.invoices.create(invoice).await?;
        tracing::info!(invoice_id = %invoice.id_string(), "Invoice created");
        Ok(invoice)
    }

    /// Invoice generated for a paid or confirmed reservation
    pub async fn create_for_reservation(
        &self,
        business_id: &str,
        business_type: BusinessType,
        reservation_id: &str,
        amount: f64,
    ) -> AppResult<Invoice> {
        let now = shared::util::now_millis();
        let item = reservation_item(reservation_id, amount);
        let invoice = Invoice {
            id: None,
            business_id: business_id.to_string(),
            business_type,
            reservation_id: reservation_id.to_string(),
            date: shared::util::today(),
            total: item.total,
            items: vec![item],
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let invoice = self.invoices.create(invoice).await?;
        tracing::info!(
            invoice_id = %invoice.id_string(),
            reservation_id = %reservation_id,
            "Reservation invoice generated"
        );
        Ok(invoice)
    }

    pub async fn update(&self, id: &str, update: InvoiceUpdate) -> AppResult<Option<Invoice>> {
        Ok(self.invoices.update(id, patch_from_update(update)).await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        Ok(self.invoices.delete(id).await?)
    }

    pub async fn find_by_reservation(&self, reservation_id: &str) -> AppResult<Option<Invoice>> {
        Ok(self.invoices.find_by_reservation(reservation_id).await?)
    }

    pub async fn delete_by_reservation(&self, reservation_id: &str) -> AppResult<()> {
        Ok(self.invoices.delete_by_reservation(reservation_id).await?)
    }

    /// Invoice that must exist, for document rendering
    pub async fn require(&self, id: &str) -> AppResult<Invoice> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::InvoiceNotFound, "Invoice not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, price: f64, quantity: Option<i32>) -> InvoiceItemInput {
        InvoiceItemInput {
            description: description.into(),
            price,
            quantity,
            total: None,
        }
    }

    fn input(items: Vec<InvoiceItemInput>, total: Option<f64>) -> InvoiceInput {
        InvoiceInput {
            business_id: "business:h1".into(),
            business_type: BusinessType::Hotel,
            reservation_id: "reservation:r1".into(),
            date: None,
            items,
            total,
        }
    }

    #[test]
    fn test_total_defaults_to_item_sum() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let invoice = build_invoice(
            input(vec![item("Night", 120.0, Some(3)), item("Breakfast", 15.5, None)], None),
            today,
            7,
        );
        assert_eq!(invoice.items[0].total, 360.0);
        assert_eq!(invoice.items[1].quantity, 1);
        assert_eq!(invoice.total, 375.5);
        assert_eq!(invoice.date, today);
        assert_eq!(invoice.created_at, 7);
    }

    #[test]
    fn test_explicit_total_is_kept_even_when_wrong() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let invoice = build_invoice(input(vec![item("Night", 100.0, Some(2))], Some(150.0)), today, 0);
        assert_eq!(invoice.total, 150.0);
        assert_eq!(invoice.items_total(), 200.0);
    }

    #[test]
    fn test_update_recomputes_total_only_without_explicit_one() {
        let patch = patch_from_update(InvoiceUpdate {
            items: Some(vec![item("Cut", 40.0, Some(2))]),
            ..Default::default()
        });
        assert_eq!(patch.total, Some(80.0));

        let patch = patch_from_update(InvoiceUpdate {
            items: Some(vec![item("Cut", 40.0, Some(2))]),
            total: Some(70.0),
            ..Default::default()
        });
        assert_eq!(patch.total, Some(70.0));

        let json = serde_json::to_value(patch_from_update(InvoiceUpdate::default())).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_reservation_item() {
        let item = reservation_item("reservation:abc", 89.0);
        assert_eq!(item.description, "Reservation reservation:abc");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.total, 89.0);
    }
}
