//! Room Repository

use super::{BaseRepository, RepoResult, TenantQuery};
use crate::db::models::{Room, RoomInput, RoomStatus, RoomUpdate};
use shared::BusinessType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(
        &self,
        business_id: &str,
        business_type: BusinessType,
        status: Option<RoomStatus>,
    ) -> RepoResult<Vec<Room>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter_opt("status = $status", "status", status)
            .order_by("number")
            .fetch(self.base.db())
            .await
    }

    /// Bookable rooms holding at least `capacity` people
    pub async fn find_bookable(
        &self,
        business_id: &str,
        business_type: BusinessType,
        capacity: i32,
    ) -> RepoResult<Vec<Room>> {
        TenantQuery::new(TABLE, business_id, business_type)
            .filter("status = $status", "status", RoomStatus::Available)
            .filter("capacity >= $capacity", "capacity", capacity)
            .order_by("number")
            .fetch(self.base.db())
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: RoomInput) -> RepoResult<Room> {
        let room = Room::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, room).await
    }

    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Option<Room>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Room>(TABLE, id).await
    }
}
