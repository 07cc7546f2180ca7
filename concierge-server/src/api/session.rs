//! Cookie session routes
//!
//! GET    /api/session             current session or 401
//! DELETE /api/session             drop the cookie (also POST /api/logout)
//! POST   /api/login               authenticate and open a session
//! POST   /api/add-service-session remember one more business
//! POST   /api/switch-service      change the active business

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use shared::{AppError, BusinessType};

use crate::services::auth::LoginInput;
use crate::session::Session;
use crate::state::AppState;

use super::error_response;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of the add/switch routes; both fields are required
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub business_id: Option<String>,
}

impl ServiceRequest {
    fn parse(&self) -> Option<(BusinessType, &str)> {
        let business_type = self.business_type.as_deref()?.parse().ok()?;
        let business_id = self.business_id.as_deref().filter(|id| !id.is_empty())?;
        Some((business_type, business_id))
    }
}

fn with_cookie(cookie: HeaderValue, body: serde_json::Value) -> Response {
    ([(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

/// Seal the session and answer `{ok:true}`
fn committed(state: &AppState, session: &Session) -> Response {
    match state.sessions.commit(session) {
        Ok(cookie) => with_cookie(cookie, json!({ "ok": true })),
        Err(e) => {
            tracing::error!(error = %e, "Failed to seal session");
            AppError::internal("Failed to save session").into_response()
        }
    }
}

// ── GET /api/session ──

pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.read(&headers);
    if !session.is_logged_in() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "isLoggedIn": false }))).into_response();
    }
    Json(session.data()).into_response()
}

// ── DELETE /api/session, POST /api/logout ──

pub async fn logout(State(state): State<AppState>) -> Response {
    with_cookie(state.sessions.destroy(), json!({ "ok": true }))
}

// ── POST /api/login ──

pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let input = LoginInput {
        email: req.email,
        password: req.password,
    };
    let payload = match state.auth.login(input).await {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };

    let session = Session::create(
        payload.user.to_session_user(),
        payload.token,
        payload.user.service_refs(),
    );
    match state.sessions.commit(&session) {
        Ok(cookie) => ([(header::SET_COOKIE, cookie)], Json(session.data())).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to seal session");
            AppError::internal("Failed to save session").into_response()
        }
    }
}

// ── POST /api/add-service-session ──

pub async fn add_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ServiceRequest>,
) -> Response {
    let Some((business_type, business_id)) = req.parse() else {
        return error_response(StatusCode::BAD_REQUEST, "businessType and businessId are required")
            .into_response();
    };
    let mut session = state.sessions.read(&headers);
    if !session.is_logged_in() {
        return error_response(StatusCode::UNAUTHORIZED, "Not logged in").into_response();
    }

    if session.add_service(business_type, business_id) {
        tracing::info!(business_id, %business_type, "Service added to session");
    }
    committed(&state, &session)
}

// ── POST /api/switch-service ──

pub async fn switch_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ServiceRequest>,
) -> Response {
    let Some((business_type, business_id)) = req.parse() else {
        return error_response(StatusCode::BAD_REQUEST, "businessType and businessId are required")
            .into_response();
    };
    let mut session = state.sessions.read(&headers);
    if !session.is_logged_in() {
        return error_response(StatusCode::UNAUTHORIZED, "Not logged in").into_response();
    }

    session.switch_service(business_type, business_id);
    committed(&state, &session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_request_needs_both_fields() {
        let req: ServiceRequest =
            serde_json::from_value(json!({ "businessType": "HOTEL", "businessId": "business:h1" }))
                .unwrap();
        assert_eq!(req.parse(), Some((BusinessType::Hotel, "business:h1")));

        let req: ServiceRequest =
            serde_json::from_value(json!({ "businessType": "hotel" })).unwrap();
        assert_eq!(req.parse(), None);

        let req: ServiceRequest =
            serde_json::from_value(json!({ "businessType": "spa", "businessId": "x" })).unwrap();
        assert_eq!(req.parse(), None);
    }
}
