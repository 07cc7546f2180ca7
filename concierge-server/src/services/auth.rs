//! Registration and login

use async_graphql::{InputObject, SimpleObject};
use shared::{AppError, AppResult, BusinessType, ErrorCode, UserRole};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::db::models::User;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, InputObject)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Registering for a business makes the user its manager, pending approval
    pub business_type: Option<BusinessType>,
    pub business_id: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// New account; business managers start inactive, platform admins active
pub fn new_user(input: RegisterInput, password_hash: String, now: i64) -> User {
    let (role, is_active) = match input.business_type {
        Some(_) => (UserRole::Manager, false),
        None => (UserRole::Admin, true),
    };
    User {
        id: None,
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        password_hash,
        role,
        business_type: input.business_type,
        business_id: input.business_id,
        is_active,
        last_login: None,
        services: Vec::new(),
        push_token: None,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(db: Surreal<Db>, jwt: JwtService) -> Self {
        Self {
            users: UserRepository::new(db),
            jwt,
        }
    }

    fn token_for(&self, user: &User) -> AppResult<String> {
        Ok(self
            .jwt
            .generate_token(&user.id_string(), &user.email, user.role)?)
    }

    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthPayload> {
        if !input.email.contains('@') {
            return Err(AppError::validation("A valid email is required"));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = User::hash_password(&input.password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::new(ErrorCode::InternalError)
        })?;
        let user = new_user(input, password_hash, shared::util::now_millis());

        let user = match self.users.create(user).await {
            Ok(user) => user,
            Err(RepoError::Duplicate(_)) => {
                return Err(AppError::conflict("User already exists with this email"));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            user_id = %user.id_string(),
            role = %user.role.as_str(),
            "User registered"
        );
        let token = self.token_for(&user)?;
        Ok(AuthPayload { token, user })
    }

    pub async fn login(&self, input: LoginInput) -> AppResult<AuthPayload> {
        let Some(user) = self.users.find_by_email(&input.email).await? else {
            security_log!(WARN, "login_failed", reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        };

        let valid = user.verify_password(&input.password).unwrap_or_else(|e| {
            tracing::error!(user_id = %user.id_string(), error = %e, "Stored password hash is unreadable");
            false
        });
        if !valid {
            security_log!(WARN, "login_failed", user_id = %user.id_string(), reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }

        let user_id = user.id_string();
        let user = self
            .users
            .touch_login(&user_id, shared::util::now_millis())
            .await?
            .unwrap_or(user);

        security_log!(INFO, "login_succeeded", user_id = %user_id);
        let token = self.token_for(&user)?;
        Ok(AuthPayload { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(business_type: Option<BusinessType>) -> RegisterInput {
        RegisterInput {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: "Ada@Example.com".into(),
            password: "secret-pass".into(),
            business_type,
            business_id: None,
        }
    }

    #[test]
    fn test_business_registration_waits_for_approval() {
        let user = new_user(input(Some(BusinessType::Salon)), "hash".into(), 1);
        assert_eq!(user.role, UserRole::Manager);
        assert!(!user.is_active);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.first_name, "Ada");
    }

    #[test]
    fn test_platform_registration_is_active_admin() {
        let user = new_user(input(None), "hash".into(), 1);
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_active);
    }
}
