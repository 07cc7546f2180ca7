//! Guest Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Guest, GuestInput, GuestStatus, GuestUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "guest";

#[derive(Clone)]
pub struct GuestRepository {
    base: BaseRepository,
}

impl GuestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active guests of a hotel, by last then first name
    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<GuestStatus>,
    ) -> RepoResult<Vec<Guest>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("status = $status", "status", status)
            .order_by("last_name, first_name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Guest>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: GuestInput) -> RepoResult<Guest> {
        let guest = Guest::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, guest).await
    }

    pub async fn update(&self, id: &str, data: GuestUpdate) -> RepoResult<Option<Guest>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Guest>(TABLE, id).await
    }
}
