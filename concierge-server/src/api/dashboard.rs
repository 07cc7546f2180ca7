//! Dashboard shell
//!
//! GET /{hotel|restaurant|salon}/dashboard[/*], GET /admin[/*]

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use crate::dashboard::{Access, Area, check_access, navigation};
use crate::state::AppState;

use super::not_found;

pub async fn shell(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let path = uri.path();
    let Some(area) = Area::from_path(path) else {
        return not_found(uri).await.into_response();
    };

    let session = state.sessions.read(&headers);
    match check_access(path, session.data()) {
        Access::Redirect(to) => {
            tracing::debug!(path, to, "Dashboard access redirected");
            Redirect::to(to).into_response()
        }
        Access::Allow => {
            let data = session.data();
            Json(json!({
                "path": path,
                "root": area.root(),
                "navigation": navigation(area),
                "user": data.user,
                "businessId": data.business_id,
                "businessType": data.business_type,
                "services": data.services,
            }))
            .into_response()
        }
    }
}
