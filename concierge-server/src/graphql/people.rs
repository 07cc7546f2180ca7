//! Guests, staff and shifts

use async_graphql::{Context, ID, Object, Result};
use chrono::NaiveDate;
use shared::BusinessType;

use crate::db::models::{
    Guest, GuestInput, GuestStatus, GuestUpdate, Shift, ShiftInput, ShiftUpdate, Staff,
    StaffInput, StaffStatus, StaffUpdate,
};
use crate::db::repository::{GuestRepository, ShiftRepository, StaffRepository};

use super::db;
use super::guard::{AuthGuard, GqlResultExt};

#[derive(Default)]
pub struct PeopleQuery;

#[Object]
impl PeopleQuery {
    /// Guests by last then first name
    #[graphql(guard = "AuthGuard")]
    async fn guests(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        status: Option<GuestStatus>,
    ) -> Result<Vec<Guest>> {
        GuestRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, status)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn guest(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Guest>> {
        GuestRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn staff(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        status: Option<StaffStatus>,
    ) -> Result<Vec<Staff>> {
        StaffRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, status)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn staff_member(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Staff>> {
        StaffRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    /// Shifts in `[startDate, endDate]`, optionally for one staff member
    #[graphql(guard = "AuthGuard")]
    async fn shifts(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        staff_id: Option<ID>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Shift>> {
        ShiftRepository::new(db(ctx)?)
            .find_all(
                &business_id,
                business_type,
                staff_id.map(|id| id.0),
                start_date,
                end_date,
            )
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn shift(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Shift>> {
        ShiftRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }
}

#[derive(Default)]
pub struct PeopleMutation;

#[Object]
impl PeopleMutation {
    #[graphql(guard = "AuthGuard")]
    async fn create_guest(&self, ctx: &Context<'_>, input: GuestInput) -> Result<Guest> {
        GuestRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_guest(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: GuestUpdate,
    ) -> Result<Option<Guest>> {
        GuestRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_guest(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        GuestRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_staff(&self, ctx: &Context<'_>, input: StaffInput) -> Result<Staff> {
        StaffRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_staff(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: StaffUpdate,
    ) -> Result<Option<Staff>> {
        StaffRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_staff(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        StaffRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_shift(&self, ctx: &Context<'_>, input: ShiftInput) -> Result<Shift> {
        ShiftRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_shift(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ShiftUpdate,
    ) -> Result<Option<Shift>> {
        ShiftRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    /// Removed for good
    #[graphql(guard = "AuthGuard")]
    async fn delete_shift(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        ShiftRepository::new(db(ctx)?).delete(&id).await.gql()
    }
}
