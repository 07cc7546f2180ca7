//! Users, authentication, businesses and client companies

use async_graphql::{Context, ID, Object, Result};
use shared::BusinessType;

use crate::db::models::{
    Business, BusinessInput, BusinessUpdate, Client, ClientInput, ClientUpdate, User, UserUpdate,
};
use crate::db::repository::{BusinessRepository, ClientRepository, UserRepository};
use crate::services::AuthService;
use crate::services::auth::{AuthPayload, LoginInput, RegisterInput};

use super::db;
use super::guard::{AdminGuard, AuthGuard, GqlResultExt, claims};

/// Business of the requested kind, otherwise nothing
async fn business_of_kind(
    ctx: &Context<'_>,
    id: &str,
    business_type: BusinessType,
) -> Result<Option<Business>> {
    let business = BusinessRepository::new(db(ctx)?).find_by_id(id).await.gql()?;
    Ok(business.filter(|b| b.business_type == business_type))
}

#[derive(Default)]
pub struct AccountQuery;

#[Object]
impl AccountQuery {
    /// The authenticated user
    #[graphql(guard = "AuthGuard")]
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(claims) = claims(ctx) else {
            return Ok(None);
        };
        UserRepository::new(db(ctx)?).find_by_id(&claims.id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn users(&self, ctx: &Context<'_>, business_id: Option<ID>) -> Result<Vec<User>> {
        UserRepository::new(db(ctx)?)
            .find_all(business_id.map(|id| id.0))
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        UserRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    /// Approved businesses of one kind
    async fn businesses(
        &self,
        ctx: &Context<'_>,
        business_type: BusinessType,
    ) -> Result<Vec<Business>> {
        BusinessRepository::new(db(ctx)?)
            .find_active(business_type)
            .await
            .gql()
    }

    async fn business(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        BusinessRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    async fn hotel(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        business_of_kind(ctx, &id, BusinessType::Hotel).await
    }

    async fn restaurant(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        business_of_kind(ctx, &id, BusinessType::Restaurant).await
    }

    async fn salon(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        business_of_kind(ctx, &id, BusinessType::Salon).await
    }

    /// Businesses waiting for approval
    #[graphql(guard = "AdminGuard")]
    async fn pending_businesses(
        &self,
        ctx: &Context<'_>,
        business_type: Option<BusinessType>,
    ) -> Result<Vec<Business>> {
        BusinessRepository::new(db(ctx)?)
            .find_pending(business_type)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn clients(&self, ctx: &Context<'_>) -> Result<Vec<Client>> {
        ClientRepository::new(db(ctx)?).find_all().await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Client>> {
        ClientRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }
}

#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    async fn register(&self, ctx: &Context<'_>, input: RegisterInput) -> Result<AuthPayload> {
        ctx.data::<AuthService>()?.register(input).await.gql()
    }

    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayload> {
        ctx.data::<AuthService>()?.login(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UserUpdate,
    ) -> Result<Option<User>> {
        UserRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        UserRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    /// Give a user access to one more business
    #[graphql(guard = "AuthGuard")]
    async fn append_user_service(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        business_id: ID,
        business_type: BusinessType,
    ) -> Result<Option<User>> {
        UserRepository::new(db(ctx)?)
            .append_service(&user_id, &business_id, business_type)
            .await
            .gql()
    }

    /// New businesses stay inactive until approved
    async fn create_business(&self, ctx: &Context<'_>, input: BusinessInput) -> Result<Business> {
        let db = db(ctx)?;
        let business = BusinessRepository::new(db.clone()).create(input).await.gql()?;
        tracing::info!(
            business_id = %business.id_string(),
            business_type = %business.business_type,
            "Business created"
        );

        if let Some(claims) = claims(ctx) {
            UserRepository::new(db)
                .append_service(&claims.id, &business.id_string(), business.business_type)
                .await
                .gql()?;
        }
        Ok(business)
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_business(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: BusinessUpdate,
    ) -> Result<Option<Business>> {
        BusinessRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_business(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        BusinessRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    /// Activate a business and its managers
    #[graphql(guard = "AdminGuard")]
    async fn approve_business(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Business>> {
        let db = db(ctx)?;
        let Some(business) = BusinessRepository::new(db.clone())
            .set_active(&id, true)
            .await
            .gql()?
        else {
            return Ok(None);
        };
        let business_id = business.id_string();
        UserRepository::new(db)
            .activate_managers(&business_id)
            .await
            .gql()?;

        tracing::info!(business_id = %business_id, "Business approved");
        Ok(Some(business))
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_client(&self, ctx: &Context<'_>, input: ClientInput) -> Result<Client> {
        ClientRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ClientUpdate,
    ) -> Result<Option<Client>> {
        ClientRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_client(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        ClientRepository::new(db(ctx)?).delete(&id).await.gql()
    }
}
