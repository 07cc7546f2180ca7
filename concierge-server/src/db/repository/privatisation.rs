//! Privatisation Option Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{PrivatisationOption, PrivatisationOptionInput, PrivatisationOptionUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "privatisation_option";

#[derive(Clone)]
pub struct PrivatisationRepository {
    base: BaseRepository,
}

impl PrivatisationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
    ) -> RepoResult<Vec<PrivatisationOption>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .order_by("name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PrivatisationOption>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: PrivatisationOptionInput) -> RepoResult<PrivatisationOption> {
        let option = PrivatisationOption::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, option).await
    }

    pub async fn update(
        &self,
        id: &str,
        data: PrivatisationOptionUpdate,
    ) -> RepoResult<Option<PrivatisationOption>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete::<PrivatisationOption>(TABLE, id).await
    }
}
