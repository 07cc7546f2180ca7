//! GraphQL schema
//!
//! Resolvers are grouped per area and merged into one query and one
//! mutation root. Services and the database handle are schema data; the
//! caller's [`Claims`] are request data, present only for a verified token.

pub mod account;
pub mod booking;
pub mod catalog;
pub mod guard;
pub mod people;

use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, MergedObject, Result, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{Claims, JwtError, JwtService};
use crate::security_log;
use crate::services::{
    AuthService, AvailabilityService, DashboardService, InvoiceService, Notifier, PaymentService,
    ReservationService,
};
use crate::state::AppState;
use crate::stripe::StripeClient;

use account::{AccountMutation, AccountQuery};
use booking::{BookingMutation, BookingQuery};
use catalog::{CatalogMutation, CatalogQuery};
use people::{PeopleMutation, PeopleQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(AccountQuery, PeopleQuery, CatalogQuery, BookingQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AccountMutation, PeopleMutation, CatalogMutation, BookingMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(
    db: Surreal<Db>,
    jwt: JwtService,
    notifier: Notifier,
    stripe: StripeClient,
) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(AuthService::new(db.clone(), jwt))
        .data(AvailabilityService::new(db.clone()))
        .data(ReservationService::new(db.clone(), notifier))
        .data(InvoiceService::new(db.clone()))
        .data(PaymentService::new(db.clone(), stripe))
        .data(DashboardService::new(db.clone()))
        .data(db)
        .finish()
}

/// Database handle for repository-backed resolvers
pub(crate) fn db(ctx: &Context<'_>) -> Result<Surreal<Db>> {
    Ok(ctx.data::<Surreal<Db>>()?.clone())
}

/// Attach the caller's claims when the bearer token verifies
///
/// A bad token is not an error here; guarded fields reject the request.
pub fn authorize(jwt: &JwtService, headers: &HeaderMap) -> Option<Claims> {
    match jwt.verify_token(headers) {
        Ok(claims) => Some(claims),
        Err(JwtError::MissingToken) => None,
        Err(e) => {
            security_log!(WARN, "token_rejected", error = %e);
            None
        }
    }
}

pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(claims) = authorize(&state.jwt, &headers) {
        request = request.data(claims);
    }
    state.schema.execute(request).await.into()
}

/// GraphiQL IDE (development only)
pub async fn graphiql(State(state): State<AppState>) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.config.graphql_path)
            .finish(),
    )
}
