//! JWT token service
//!
//! Tokens are signed with the shared `JWT_SECRET` and live for a year.

use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::{AppError, UserRole};
use thiserror::Error;

/// Token lifetime
pub const TOKEN_EXPIRATION_DAYS: i64 = 365;

/// Identity carried in the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User record id (`user:key`)
    pub id: String,
    pub email: String,
    pub role: UserRole,
    /// Issued at (seconds)
    pub iat: i64,
    /// Expiry (seconds)
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::MissingToken => AppError::not_authenticated(),
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => {
                AppError::invalid_token(err.to_string())
            }
            JwtError::GenerationFailed(msg) => AppError::internal(msg),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration: Duration::days(TOKEN_EXPIRATION_DAYS),
        }
    }

    /// Sign a token for a user
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        role: UserRole,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature and expiry, then decode the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract token from an `Authorization: Bearer ...` value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Verify the bearer token of a request
    pub fn verify_token(&self, headers: &HeaderMap) -> Result<Claims, JwtError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Self::extract_from_header)
            .ok_or(JwtError::MissingToken)?;
        self.validate_token(token)
    }
}
