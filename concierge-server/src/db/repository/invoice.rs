//! Invoice Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::Invoice;
use serde::Serialize;
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "invoice";

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Newest first
    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        reservation_id: Option<String>,
    ) -> RepoResult<Vec<Invoice>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("reservation_id = $reservation_id", "reservation_id", reservation_id)
            .order_by("date DESC, created_at DESC")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        self.base.find_by_id(TABLE, id).await
    }

    /// First invoice issued for a reservation
    pub async fn find_by_reservation(&self, reservation_id: &str) -> RepoResult<Option<Invoice>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM invoice WHERE reservation_id = $reservation_id ORDER BY created_at LIMIT 1")
            .bind(("reservation_id", reservation_id.to_string()))
            .await?;
        let invoices: Vec<Invoice> = result.take(0)?;
        Ok(invoices.into_iter().next())
    }

    pub async fn create(&self, invoice: Invoice) -> RepoResult<Invoice> {
        self.base.create(TABLE, invoice).await
    }

    pub async fn update<P>(&self, id: &str, patch: P) -> RepoResult<Option<Invoice>>
    where
        P: Serialize + 'static,
    {
        self.base.merge(TABLE, id, patch).await
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete::<Invoice>(TABLE, id).await
    }

    /// Remove every invoice of a reservation
    pub async fn delete_by_reservation(&self, reservation_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE invoice WHERE reservation_id = $reservation_id")
            .bind(("reservation_id", reservation_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
