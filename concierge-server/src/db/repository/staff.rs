//! Staff Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Staff, StaffInput, StaffStatus, StaffUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<StaffStatus>,
    ) -> RepoResult<Vec<Staff>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("status = $status", "status", status)
            .order_by("name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: StaffInput) -> RepoResult<Staff> {
        let staff = Staff::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, staff).await
    }

    pub async fn update(&self, id: &str, data: StaffUpdate) -> RepoResult<Option<Staff>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Staff>(TABLE, id).await
    }
}
