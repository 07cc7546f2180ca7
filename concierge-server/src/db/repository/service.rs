//! Salon Service Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Service, ServiceInput, ServiceUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "service";

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        category: Option<String>,
    ) -> RepoResult<Vec<Service>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("category = $category", "category", category)
            .order_by("name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: ServiceInput) -> RepoResult<Service> {
        let service = Service::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, service).await
    }

    pub async fn update(&self, id: &str, data: ServiceUpdate) -> RepoResult<Option<Service>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Service>(TABLE, id).await
    }
}
