//! Business Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{Business, BusinessInput, BusinessUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "business";

#[derive(Clone)]
pub struct BusinessRepository {
    base: BaseRepository,
}

impl BusinessRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Approved businesses of one kind, by name
    pub async fn find_active(&self, business_type: BusinessType) -> RepoResult<Vec<Business>> {
        let businesses: Vec<Business> = self
            .base
            .db()
            .query(
                "SELECT * FROM business WHERE business_type = $business_type AND is_active = true ORDER BY name",
            )
            .bind(("business_type", business_type.as_str()))
            .await?
            .take(0)?;
        Ok(businesses)
    }

    /// Businesses waiting for approval, oldest first
    pub async fn find_pending(
        &self,
        business_type: Option<BusinessType>,
    ) -> RepoResult<Vec<Business>> {
        let mut sql = String::from("SELECT * FROM business WHERE is_active = false");
        if business_type.is_some() {
            sql.push_str(" AND business_type = $business_type");
        }
        sql.push_str(" ORDER BY created_at");

        let businesses: Vec<Business> = self
            .base
            .db()
            .query(sql)
            .bind(("business_type", business_type.map(|t| t.as_str())))
            .await?
            .take(0)?;
        Ok(businesses)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Business>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: BusinessInput) -> RepoResult<Business> {
        let business = Business::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, business).await
    }

    pub async fn update(&self, id: &str, data: BusinessUpdate) -> RepoResult<Option<Business>> {
        self.base.merge(TABLE, id, data).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> RepoResult<Option<Business>> {
        self.base
            .merge(TABLE, id, serde_json::json!({ "is_active": is_active }))
            .await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Business>(TABLE, id).await
    }
}
