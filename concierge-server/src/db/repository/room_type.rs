//! Room Type Repository

use super::{BaseRepository, RepoError, RepoResult, TenantQuery};
use crate::db::models::{RoomCategory, RoomCategoryInput, RoomCategoryUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "room_type";

#[derive(Clone)]
pub struct RoomTypeRepository {
    base: BaseRepository,
}

impl RoomTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
    ) -> RepoResult<Vec<RoomCategory>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .order_by("name")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RoomCategory>> {
        self.base.find_by_id(TABLE, id).await
    }

    async fn find_by_name(
        &self,
        business_id: &str,
        business_type: BusinessType,
        name: &str,
    ) -> RepoResult<Option<RoomCategory>> {
        let found = TenantQuery::new(TABLE, business_id, business_type)
            .filter("name = $name", "name", name.to_string())
            .fetch::<RoomCategory>(self.base.db())
            .await?;
        Ok(found.into_iter().next())
    }

    fn duplicate(name: &str) -> RepoError {
        RepoError::Duplicate(format!("Room type '{}' already exists", name))
    }

    pub async fn create(&self, data: RoomCategoryInput) -> RepoResult<RoomCategory> {
        let room_type = RoomCategory::from_input(data, shared::util::now_millis());
        if room_type.name.is_empty() {
            return Err(RepoError::Validation("Room type name is required".into()));
        }
        if self
            .find_by_name(&room_type.business_id, room_type.business_type, &room_type.name)
            .await?
            .is_some()
        {
            return Err(Self::duplicate(&room_type.name));
        }
        self.base.create(TABLE, room_type).await
    }

    pub async fn update(
        &self,
        id: &str,
        mut data: RoomCategoryUpdate,
    ) -> RepoResult<Option<RoomCategory>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        data.name = data
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if let Some(name) = &data.name {
            let clash = self
                .find_by_name(&existing.business_id, existing.business_type, name)
                .await?;
            if clash.is_some_and(|other| other.id != existing.id) {
                return Err(Self::duplicate(name));
            }
        }
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<RoomCategory>(TABLE, id).await
    }
}
