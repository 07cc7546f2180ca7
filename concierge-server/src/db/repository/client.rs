//! Client Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{Client, ClientInput, ClientUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "client";

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active clients, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Client>> {
        let clients: Vec<Client> = self
            .base
            .db()
            .query("SELECT * FROM client WHERE is_active = true ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(clients)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        self.base.find_by_id(TABLE, id).await
    }

    pub async fn create(&self, data: ClientInput) -> RepoResult<Client> {
        let client = Client::from_input(data, shared::util::now_millis());
        self.base.create(TABLE, client).await
    }

    pub async fn update(&self, id: &str, data: ClientUpdate) -> RepoResult<Option<Client>> {
        self.base.merge(TABLE, id, data).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.soft_delete::<Client>(TABLE, id).await
    }
}
