//! User Model

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use shared::session::{ServiceRef, SessionUser};
use shared::{BusinessType, UserRole};
use surrealdb::RecordId;

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    #[graphql(skip)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC string
    #[graphql(skip)]
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub business_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<i64>,
    /// Secondary businesses this user manages
    #[serde(default)]
    pub services: Vec<UserService>,
    #[serde(default)]
    #[graphql(skip)]
    pub push_token: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct UserService {
    pub business_id: String,
    pub business_type: BusinessType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, InputObject)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    pub fn has_service(&self, business_type: BusinessType, business_id: &str) -> bool {
        self.services
            .iter()
            .any(|s| s.business_type == business_type && s.business_id == business_id)
    }

    /// Identity snapshot stored in the session cookie
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id_string(),
            first_name: Some(self.first_name.clone()).filter(|s| !s.is_empty()),
            last_name: Some(self.last_name.clone()).filter(|s| !s.is_empty()),
            email: self.email.clone(),
            role: self.role,
            business_type: self.business_type,
            business_id: self.business_id.clone(),
            is_active: self.is_active,
        }
    }

    /// Secondary services as session references (all inactive)
    pub fn service_refs(&self) -> Vec<ServiceRef> {
        self.services
            .iter()
            .map(|s| ServiceRef::new(s.business_type, s.business_id.clone(), false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(hash: String) -> User {
        User {
            id: Some(RecordId::from_table_key("user", "u1")),
            first_name: "Ada".into(),
            last_name: String::new(),
            email: "ada@example.com".into(),
            password_hash: hash,
            role: UserRole::Manager,
            business_type: Some(BusinessType::Hotel),
            business_id: Some("business:h1".into()),
            is_active: true,
            last_login: None,
            services: vec![UserService {
                business_id: "business:s1".into(),
                business_type: BusinessType::Salon,
            }],
            push_token: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_password_round_trip() {
        let hash = User::hash_password("s3cret").unwrap();
        let u = user(hash);
        assert!(u.verify_password("s3cret").unwrap());
        assert!(!u.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_session_snapshot() {
        let u = user(String::new());
        let snapshot = u.to_session_user();
        assert_eq!(snapshot.id, "user:u1");
        assert_eq!(snapshot.first_name.as_deref(), Some("Ada"));
        assert!(snapshot.last_name.is_none());
        assert!(u.has_service(BusinessType::Salon, "business:s1"));
        assert_eq!(u.service_refs()[0].business_id, "business:s1");
    }
}
