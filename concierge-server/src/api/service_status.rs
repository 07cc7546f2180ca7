//! POST /api/service-status: activation flags for a batch of businesses
//!
//! Each pair is answered by one query against the in-process schema; a pair
//! that fails for any reason reports `false`. Entries may use `type`/`id`
//! in place of `businessType`/`businessId`; entries with neither are skipped.

use async_graphql::{Request, Variables};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use shared::BusinessType;
use shared::session::ServiceStatus;

use crate::graphql::AppSchema;
use crate::state::AppState;

use super::error_response;

pub async fn service_status(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(services) = body.get("services").and_then(Value::as_array) else {
        return error_response(StatusCode::BAD_REQUEST, "services array is required")
            .into_response();
    };

    let mut statuses = Vec::with_capacity(services.len());
    for (kind, id) in services.iter().filter_map(requested) {
        let is_active = is_active(&state.schema, &kind, &id).await;
        statuses.push(ServiceStatus { kind, id, is_active });
    }

    Json(json!({ "statuses": statuses })).into_response()
}

fn field<'a>(service: &'a Value, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| service.get(*name).and_then(Value::as_str))
}

/// Lowercased type and id of one entry; `None` when it names neither
fn requested(service: &Value) -> Option<(String, String)> {
    let kind = field(service, &["businessType", "type"]);
    let id = field(service, &["businessId", "id"]);
    if kind.is_none() && id.is_none() {
        return None;
    }

    let kind = kind.unwrap_or_default();
    let kind = match kind.parse::<BusinessType>() {
        Ok(business_type) => business_type.as_str().to_string(),
        Err(_) => kind.to_ascii_lowercase(),
    };
    Some((kind, id.unwrap_or_default().to_string()))
}

async fn is_active(schema: &AppSchema, kind: &str, id: &str) -> bool {
    let Ok(business_type) = kind.parse::<BusinessType>() else {
        return false;
    };
    if id.is_empty() {
        return false;
    }

    // `hotel(id:)`, `restaurant(id:)` or `salon(id:)`
    let field = business_type.as_str();
    let query = format!("query ServiceStatus($id: ID!) {{ {field}(id: $id) {{ isActive }} }}");
    let request = Request::new(query).variables(Variables::from_json(json!({ "id": id })));

    let response = schema.execute(request).await;
    if !response.errors.is_empty() {
        tracing::warn!(
            business_id = id,
            business_type = field,
            errors = ?response.errors,
            "Service status query failed"
        );
        return false;
    }
    response
        .data
        .into_json()
        .ok()
        .and_then(|data| data.get(field)?.get("isActive")?.as_bool())
        .unwrap_or(false)
}
