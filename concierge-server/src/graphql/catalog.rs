//! Rooms, room types, tables, salon services, menu items, privatisation
//! options and their availability

use async_graphql::{Context, ID, Object, Result};
use chrono::NaiveDate;
use shared::BusinessType;

use crate::db::models::{
    MenuItem, MenuItemInput, MenuItemUpdate, PrivatisationOption, PrivatisationOptionInput,
    PrivatisationOptionUpdate, Room, RoomCategory, RoomCategoryInput, RoomCategoryUpdate,
    RoomInput, RoomStatus, RoomUpdate, Service, ServiceInput, ServiceUpdate, Table, TableInput,
    TableStatus, TableUpdate,
};
use crate::db::repository::{
    MenuItemRepository, PrivatisationRepository, RoomRepository, RoomTypeRepository,
    ServiceRepository, TableRepository,
};
use crate::services::AvailabilityService;

use super::db;
use super::guard::{AuthGuard, GqlResultExt};

#[derive(Default)]
pub struct CatalogQuery;

#[Object]
impl CatalogQuery {
    #[graphql(guard = "AuthGuard")]
    async fn rooms(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        status: Option<RoomStatus>,
    ) -> Result<Vec<Room>> {
        RoomRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, status)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn room(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Room>> {
        RoomRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn room_types(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
    ) -> Result<Vec<RoomCategory>> {
        RoomTypeRepository::new(db(ctx)?)
            .find_all(&business_id, business_type)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn room_type(&self, ctx: &Context<'_>, id: ID) -> Result<Option<RoomCategory>> {
        RoomTypeRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    /// Rooms free over `[checkIn, checkOut)` for the party
    async fn available_rooms(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        #[graphql(default = 1)] adults: i32,
        children: Option<i32>,
    ) -> Result<Vec<Room>> {
        ctx.data::<AvailabilityService>()?
            .available_rooms(&business_id, business_type, check_in, check_out, adults, children)
            .await
            .gql()
    }

    async fn available_rooms_count(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        #[graphql(default = 1)] adults: i32,
        children: Option<i32>,
    ) -> Result<i32> {
        let count = ctx
            .data::<AvailabilityService>()?
            .available_rooms_count(&business_id, business_type, check_in, check_out, adults, children)
            .await
            .gql()?;
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    #[graphql(guard = "AuthGuard")]
    async fn tables(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        status: Option<TableStatus>,
        location: Option<String>,
    ) -> Result<Vec<Table>> {
        TableRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, status, location)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn table(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Table>> {
        TableRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    /// Tables free on `date` for `[time, time + duration)`; the whole day
    /// without a time
    async fn available_tables(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        date: NaiveDate,
        time: Option<String>,
        duration: Option<i32>,
        party_size: i32,
    ) -> Result<Vec<Table>> {
        ctx.data::<AvailabilityService>()?
            .available_tables(
                &business_id,
                business_type,
                date,
                time.as_deref(),
                duration,
                party_size,
            )
            .await
            .gql()
    }

    async fn services(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        category: Option<String>,
    ) -> Result<Vec<Service>> {
        ServiceRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, category)
            .await
            .gql()
    }

    async fn service(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Service>> {
        ServiceRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    async fn menu_items(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
        category: Option<String>,
    ) -> Result<Vec<MenuItem>> {
        MenuItemRepository::new(db(ctx)?)
            .find_all(&business_id, business_type, category)
            .await
            .gql()
    }

    async fn menu_item(&self, ctx: &Context<'_>, id: ID) -> Result<Option<MenuItem>> {
        MenuItemRepository::new(db(ctx)?).find_by_id(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn privatisation_options(
        &self,
        ctx: &Context<'_>,
        business_id: ID,
        business_type: BusinessType,
    ) -> Result<Vec<PrivatisationOption>> {
        PrivatisationRepository::new(db(ctx)?)
            .find_all(&business_id, business_type)
            .await
            .gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn privatisation_option(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<PrivatisationOption>> {
        PrivatisationRepository::new(db(ctx)?)
            .find_by_id(&id)
            .await
            .gql()
    }
}

#[derive(Default)]
pub struct CatalogMutation;

#[Object]
impl CatalogMutation {
    #[graphql(guard = "AuthGuard")]
    async fn create_room(&self, ctx: &Context<'_>, input: RoomInput) -> Result<Room> {
        RoomRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_room(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: RoomUpdate,
    ) -> Result<Option<Room>> {
        RoomRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_room(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        RoomRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_table(&self, ctx: &Context<'_>, input: TableInput) -> Result<Table> {
        TableRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_table(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: TableUpdate,
    ) -> Result<Option<Table>> {
        TableRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_table(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        TableRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_service(&self, ctx: &Context<'_>, input: ServiceInput) -> Result<Service> {
        ServiceRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_service(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ServiceUpdate,
    ) -> Result<Option<Service>> {
        ServiceRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_service(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        ServiceRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_menu_item(&self, ctx: &Context<'_>, input: MenuItemInput) -> Result<MenuItem> {
        MenuItemRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_menu_item(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: MenuItemUpdate,
    ) -> Result<Option<MenuItem>> {
        MenuItemRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_menu_item(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        MenuItemRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_room_type(
        &self,
        ctx: &Context<'_>,
        input: RoomCategoryInput,
    ) -> Result<RoomCategory> {
        RoomTypeRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_room_type(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: RoomCategoryUpdate,
    ) -> Result<Option<RoomCategory>> {
        RoomTypeRepository::new(db(ctx)?).update(&id, input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn delete_room_type(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        RoomTypeRepository::new(db(ctx)?).delete(&id).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn create_privatisation_option(
        &self,
        ctx: &Context<'_>,
        input: PrivatisationOptionInput,
    ) -> Result<PrivatisationOption> {
        PrivatisationRepository::new(db(ctx)?).create(input).await.gql()
    }

    #[graphql(guard = "AuthGuard")]
    async fn update_privatisation_option(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: PrivatisationOptionUpdate,
    ) -> Result<Option<PrivatisationOption>> {
        PrivatisationRepository::new(db(ctx)?)
            .update(&id, input)
            .await
            .gql()
    }

    /// Removed for good
    #[graphql(guard = "AuthGuard")]
    async fn delete_privatisation_option(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        PrivatisationRepository::new(db(ctx)?).delete(&id).await.gql()
    }
}
