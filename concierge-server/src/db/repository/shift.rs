//! Shift Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Shift, ShiftInput, ShiftUpdate};
use chrono::NaiveDate;
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "shift";

#[derive(Clone)]
pub struct ShiftRepository {
    base: BaseRepository,
}

impl ShiftRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Shifts in `[start_date, end_date]`, by date then start time
    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        staff_id: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RepoResult<Vec<Shift>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("staff_id = $staff_id", "staff_id", staff_id)
            .filter_opt("date >= $start_date", "start_date", start_date)
            .filter_opt("date <= $end_date", "end_date", end_date)
            .order_by("date, start_time")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Shift>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: ShiftInput) -> RepoResult<Shift> {
        let shift = Shift::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, shift).await
    }

    pub async fn update(&self, id: &str, data: ShiftUpdate) -> RepoResult<Option<Shift>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete::<Shift>(TABLE, id).await
    }
}
