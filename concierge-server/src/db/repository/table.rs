//! Dining Table Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Table, TableInput, TableStatus, TableUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct TableRepository {
    base: BaseRepository,
}

impl TableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<TableStatus>,
        location: Option<String>,
    ) -> RepoResult<Vec<Table>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("status = $status", "status", status)
            .filter_opt("location = $location", "location", location)
            .order_by("number")
            .fetch(self.base.db())
            .await
    }

    /// Bookable tables seating at least `party_size`
    pub async fn find_bookable(
        &self,
        business_id: &str,
        business_type: BusinessType,
        party_size: i32,
    ) -> RepoResult<Vec<Table>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("status = $status", "status", TableStatus::Available)
            .filter("capacity >= $party_size", "party_size", party_size)
            .order_by("number")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: TableInput) -> RepoResult<Table> {
        let table = Table::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, table).await
    }

    pub async fn update(&self, id: &str, data: TableUpdate) -> RepoResult<Option<Table>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Table>(TABLE, id).await
    }
}
