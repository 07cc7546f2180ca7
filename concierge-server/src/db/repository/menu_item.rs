//! Menu Item Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{MenuItem, MenuItemInput, MenuItemUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active dishes grouped by category
    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        category: Option<String>,
    ) -> RepoResult<Vec<MenuItem>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("category = $category", "category", category)
            .order_by("category, name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: MenuItemInput) -> RepoResult<MenuItem> {
        let item = MenuItem::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, item).await
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<Option<MenuItem>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<MenuItem>(TABLE, id).await
    }
}
