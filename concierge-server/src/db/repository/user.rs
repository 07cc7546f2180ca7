//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserService, UserUpdate};
use shared::{BusinessType, UserRole};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All users, or the users attached to one business
    pub async fn find_all(&self, business_id: Option<String>) -> RepoResult<Vec<User>> {
        let sql = if business_id.is_some() {
            "SELECT * FROM user WHERE business_id = $business_id OR $business_id IN services.business_id ORDER BY email"
        } else {
            "SELECT * FROM user ORDER BY email"
        };
        let users: Vec<User> = self
            .base
            .db()
            .query(sql)
            .bind(("business_id", business_id))
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.base.find_by_id(TABLE, id).await
    }

    /// Emails are stored lowercase
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.trim().to_lowercase()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, mut user: User) -> RepoResult<User> {
        user.email = user.email.trim().to_lowercase();
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        self.base.create(TABLE, user).await
    }

    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<Option<User>> {
        self.base.merge(TABLE, id, data).await
    }

    pub async fn touch_login(&self, id: &str, at: i64) -> RepoResult<Option<User>> {
        self.base
            .merge(TABLE, id, serde_json::json!({ "last_login": at }))
            .await
    }

    /// Add a secondary service unless the user already has it
    pub async fn append_service(
        &self,
        id: &str,
        business_id: &str,
        business_type: BusinessType,
    ) -> RepoResult<Option<User>> {
        let Some(mut user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        if user.has_service(business_type, business_id) {
            return Ok(Some(user));
        }
        user.services.push(UserService {
            business_id: business_id.to_string(),
            business_type,
        });
        self.base
            .merge(TABLE, id, serde_json::json!({ "services": user.services }))
            .await
    }

    /// Activate the managers of a newly approved business
    pub async fn activate_managers(&self, business_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE user SET is_active = true, updated_at = $now WHERE business_id = $business_id AND role = $role",
            )
            .bind(("business_id", business_id.to_string()))
            .bind(("role", UserRole::Manager.as_str()))
            .bind(("now", shared::util::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Push tokens of the active users working for a business
    pub async fn push_tokens(&self, business_id: &str) -> RepoResult<Vec<String>> {
        let tokens: Vec<Option<String>> = self
            .base
            .db()
            .query(
                "SELECT VALUE push_token FROM user WHERE is_active = true \
                 AND (business_id = $business_id OR $business_id IN services.business_id)",
            )
            .bind(("business_id", business_id.to_string()))
            .await?
            .take(0)?;
        Ok(tokens
            .into_iter()
            .flatten()
            .filter(|token| !token.is_empty())
            .collect())
    }

    /// Hard delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base.delete::<User>(TABLE, id).await
    }
}
