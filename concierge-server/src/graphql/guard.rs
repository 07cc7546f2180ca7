//! Field guards and error conversion for resolvers

use async_graphql::{Context, ErrorExtensions, Guard, Result};
use shared::{AppError, ErrorCode};

use crate::auth::Claims;

/// Message of every authentication failure
pub const ACCESS_FORBIDDEN: &str = "Access Forbidden";

/// Passes when the request carried a verified bearer token
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<Claims>() {
            Some(_) => Ok(()),
            None => Err(AppError::with_message(ErrorCode::NotAuthenticated, ACCESS_FORBIDDEN).extend()),
        }
    }
}

/// Passes for platform administrators only
pub struct AdminGuard;

impl Guard for AdminGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<Claims>() {
            Some(claims) if claims.is_admin() => Ok(()),
            Some(claims) => {
                crate::security_log!(WARN, "admin_required", user_id = %claims.id);
                Err(AppError::new(ErrorCode::AdminRequired).extend())
            }
            None => Err(AppError::with_message(ErrorCode::NotAuthenticated, ACCESS_FORBIDDEN).extend()),
        }
    }
}

/// `AppError` (or anything convertible into it) as a GraphQL error with a
/// `code` extension
pub trait GqlResultExt<T> {
    fn gql(self) -> Result<T>;
}

impl<T, E> GqlResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn gql(self) -> Result<T> {
        self.map_err(|e| e.into().extend())
    }
}

/// Claims of the caller, when authenticated
pub fn claims<'a>(ctx: &'a Context<'_>) -> Option<&'a Claims> {
    ctx.data_opt::<Claims>()
}
