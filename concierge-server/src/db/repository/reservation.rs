//! Reservation Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Reservation, ReservationStatus};
use chrono::NaiveDate;
use serde::Serialize;
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Newest date first
    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<ReservationStatus>,
        date: Option<NaiveDate>,
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("status = $status", "status", status)
            .filter_opt("date = $date", "date", date)
            .order_by("date DESC, created_at DESC")
            .fetch(self.base.db())
            .await
    }

    /// Room stays that still hold their room
    pub async fn find_blocking_rooms(
        &self,
        business_id: &str,
        business_type: BusinessType,
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("booking.kind = $kind", "kind", "room")
            .filter("status IN $statuses", "statuses", ReservationStatus::BLOCKING)
            .fetch(self.base.db())
            .await
    }

    /// Table bookings on `date` that still hold their table
    pub async fn find_blocking_tables(
        &self,
        business_id: &str,
        business_type: BusinessType,
        date: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("booking.kind = $kind", "kind", "table")
            .filter("date = $date", "date", date)
            .filter("status IN $statuses", "statuses", ReservationStatus::BLOCKING)
            .fetch(self.base.db())
            .await
    }

    /// Reservations of any kind on `date` in one of `statuses`
    pub async fn find_on_date(
        &self,
        business_id: &str,
        business_type: BusinessType,
        date: NaiveDate,
        statuses: &[ReservationStatus],
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("date = $date", "date", date)
            .filter("status IN $statuses", "statuses", statuses)
            .fetch(self.base.db())
            .await
    }

    /// Created within `[from_ms, to_ms)`, newest first
    pub async fn find_created_between(
        &self,
        business_id: &str,
        business_type: BusinessType,
        from_ms: i64,
        to_ms: i64,
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("created_at >= $from_ms", "from_ms", from_ms)
            .filter("created_at < $to_ms", "to_ms", to_ms)
            .order_by("created_at DESC")
            .fetch(self.base.db())
            .await
    }

    /// Dated within `[start, end)`
    pub async fn find_dated_between(
        &self,
        business_id: &str,
        business_type: BusinessType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Reservation>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("date >= $start", "start", start)
            .filter("date < $end", "end", end)
            .order_by("date")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        self.base.create(TABLE, reservation).await
    }

    pub async fn update<P>(&self, id: &str, patch: P) -> RepoResult<Option<Reservation>>
    where
        P: Serialize + 'static,
    {
        self.base.merge(TABLE, id, patch).await
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete::<Reservation>(TABLE, id).await
    }
}
